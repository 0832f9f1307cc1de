//! Rewrites a struct's tags and prints the resulting Go declaration.
//!
//! Every field gets an `env` tag derived from its `json` tag.
//!
//! Run with: `cargo run --example update_tags`

use reflectgo::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let original = vec![
        StructField::new("A", TypeDesc::builtin("int")).with_tag(r#"json:"a""#),
        StructField::new("B", TypeDesc::builtin("int")).with_tag(r#"json:"b""#),
    ];

    let fields = original
        .into_iter()
        .map(|mut field| {
            let env = field.tag.get("json").to_uppercase();
            field.tag = field.tag.with("env", &env);
            field
        })
        .collect();

    let file = GoFile::builder("pkg")
        .define_type_with(
            "UpdatedTags",
            &TypeDesc::structure(fields),
            TypeOptions::new().comment("UpdatedTags carries an env tag for every json tag."),
        )
        .build()?;

    file.render(std::io::stdout().lock())?;
    Ok(())
}
