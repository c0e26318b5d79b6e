//! Example: Building a family tree in code
//!
//! This example assembles a three-generation family with the `Person`
//! builder methods instead of parsing JSON, lays it out, and writes both
//! export formats next to each other.

use lineage::{TreeBuilder, diagram::Link, family::Person};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building family tree from code...\n");

    let grandchildren = [Person::new(7, "Sofia"), Person::new(8, "Marko")];

    let root = Person::new(1, "Olena")
        .with_husband(Person::new(2, "Taras"))
        .with_child(
            Person::new(3, "Ivan")
                .with_wife(Person::new(4, "Daria"))
                .with_children(grandchildren),
        )
        .with_child(Person::new(5, "Maria").with_field("born", 1994))
        .with_child(Person::new(6, "Petro"));

    println!(
        "{} people over {} generations",
        root.descendant_count(),
        root.depth()
    );

    let builder = TreeBuilder::default();
    let layout = builder.layout(&root, 1200.0);

    for node in layout.nodes() {
        println!("  {:>20} at ({:.1}, {:.1})", node.id().to_string(), node.x(), node.y());
    }

    let platforms = layout
        .links()
        .iter()
        .filter(|link| matches!(link, Link::Platform { .. }))
        .count();
    println!("\n{} links, {platforms} platforms", layout.links().len());

    let svg = builder.render_svg(&layout)?;
    std::fs::write("from_person.svg", svg)?;

    let json = builder.render_json(&layout)?;
    std::fs::write("from_person.json", json)?;

    println!("\nWrote from_person.svg and from_person.json");
    Ok(())
}
