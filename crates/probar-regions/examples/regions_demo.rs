//! Example: Page Object Regions
//!
//! Demonstrates: `has_one` / `has_many` regions, collection finders and
//! runtime capability changes against an in-memory document
//!
//! Run with: `cargo run --example regions_demo`
//!
//! Toyota Way: Genchi Genbutsu (Go and See) - regions are read from the live document

use probar_regions::prelude::*;
use serde_json::Value;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct TeamPage {
    context: PageContext,
}

impl_page_object!(TeamPage);

#[derive(Debug, Clone)]
struct HeaderRegion {
    context: PageContext,
}

impl_region!(HeaderRegion);

impl HeaderRegion {
    fn title(&self) -> PageResult<String> {
        self.text(&Selector::tag_name("h1"))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MemberRegion {
    context: PageContext,
}

impl_region!(MemberRegion);

impl MemberRegion {
    fn name(&self) -> PageResult<String> {
        self.text(&Selector::class("name"))
    }
}

impl Findable for MemberRegion {
    fn read_attribute(&self, name: &str) -> PageResult<Value> {
        match name {
            "name" => Ok(self.name()?.into()),
            other => Err(unknown_attribute::<Self>(other)),
        }
    }
}

#[derive(Debug, Clone)]
struct MembersRegion {
    collection: RegionCollection<MemberRegion>,
}

impl_collection_region!(MembersRegion, MemberRegion);

regions! {
    impl TeamPage {
        has_one header: HeaderRegion;
        has_many members / member => MembersRegion {
            each: Selector::class("member"),
            within: Selector::id("team"),
        };
        has_one stats {
            body: RegionBody::new().element("total", "td", Selector::class("total")),
        };
    }
}

fn build_document() -> PageResult<Rc<MockDocument>> {
    let document = Rc::new(MockDocument::new());
    let _ = document.append(MockElement::new("h1").text("Platform Team"));
    let team = document.append(MockElement::new("ul").attr("id", "team"));
    for name in ["Ada", "Grace", "Linus"] {
        let member = document.append_to(&team, MockElement::new("li").class("member"))?;
        let _ = document.append_to(&member, MockElement::new("span").class("name").text(name))?;
    }
    let _ = document.append(MockElement::new("td").class("total").text("3"));
    Ok(document)
}

fn main() -> PageResult<()> {
    let _ = init_logging(None)?;

    println!("=== Page Object Regions Example ===\n");

    // 1. Session over an in-memory document
    println!("1. Building the document and session...");
    let document = build_document()?;
    let page = TeamPage {
        context: PageContext::new(Session::new(document.clone())),
    };
    println!("   Elements: {}", document.len());

    // 2. Single region
    println!("\n2. has_one header...");
    let header = page.header()?;
    println!("   Title: {}", header.title()?);
    println!("   Scope: {}", header.region_element());

    // 3. Collection region
    println!("\n3. has_many members...");
    let members = page.members()?;
    for member in &members {
        println!("   - {}", member.name()?);
    }

    // 4. Finder
    println!("\n4. Finder member(name: \"Grace\")...");
    let grace = page.member(&Attributes::from([("name", "Grace")]))?;
    println!("   Found: {}", grace.name()?);
    match page.member(&Attributes::from([("name", "Bjarne")])) {
        Ok(_) => println!("   Unexpected match"),
        Err(e) => println!("   {e}"),
    }

    // 5. Recomputation
    println!("\n5. Removing a member...");
    if let Some(element) = grace.region_element().element() {
        let _ = document.remove(element);
    }
    println!("   Members now: {}", page.members()?.len());

    // 6. Capabilities
    println!("\n6. Runtime capabilities...");
    let stats = page.stats()?;
    match stats.read("total") {
        Ok(total) => println!("   Total: {total}"),
        Err(e) => println!("   {e}"),
    }
    let _ = page.session().capabilities_mut().add_readable("td");
    println!("   Total after adding `td`: {}", stats.read("total")?);

    // 7. Pluralization
    println!("\n7. Pluralization...");
    for tag in ["div", "checkbox", "nonexistent"] {
        match pluralize(tag) {
            Ok(plural) => println!("   {tag} -> {plural}"),
            Err(e) => println!("   {e}"),
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
