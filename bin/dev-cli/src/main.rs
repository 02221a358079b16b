use std::env;
use std::process;

use graphql_query_builder::{
    compile_operation, Document, OperationKind, SchemaMetadata, SelectionSet,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let tree_layer = tracing_tree::HierarchicalLayer::new(2)
        .with_bracketed_fields(true)
        .with_deferred_spans(false)
        .with_wraparound(25)
        .with_indent_lines(true)
        .with_timer(tracing_tree::time::Uptime::default())
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_targets(false);

    tracing_subscriber::registry()
        .with(tree_layer)
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: qb-dev-cli <command> [...]");
        process::exit(1);
    }

    match args[1].as_str() {
        "query" | "mutation" => {
            let operation_kind = match args[1].as_str() {
                "mutation" => OperationKind::Mutation,
                _ => OperationKind::Query,
            };
            let document = process_document(&args, operation_kind);
            println!("{}", document);
        }
        "variables" => {
            let document = process_document(&args, OperationKind::Query);
            match serde_json::to_string_pretty(document.variable_definitions()) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&format!("Failed to serialize variables: {}", e)),
            }
        }
        "metadata-schema" => match serde_json::to_string_pretty(&SchemaMetadata::json_schema()) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Failed to serialize metadata schema: {}", e)),
        },
        _ => {
            eprintln!(
                "Unknown command. Available commands: query, mutation, variables, metadata-schema"
            );
            process::exit(1);
        }
    };
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn process_document(args: &[String], operation_kind: OperationKind) -> Document {
    if args.len() < 4 {
        fail(
            "Usage: qb-dev-cli <query|mutation|variables> <metadata_path> <selection_path> [name]",
        );
    }

    let metadata = SchemaMetadata::from_file(&args[2])
        .unwrap_or_else(|e| fail(&format!("Failed to load schema metadata: {}", e)));
    let selection_json = std::fs::read_to_string(&args[3])
        .unwrap_or_else(|e| fail(&format!("Unable to read {}: {}", args[3], e)));
    let selection_set: SelectionSet = serde_json::from_str(&selection_json)
        .unwrap_or_else(|e| fail(&format!("Invalid selection tree: {}", e)));

    compile_operation(
        &metadata,
        operation_kind,
        args.get(4).map(String::as_str),
        &selection_set,
    )
    .unwrap_or_else(|e| fail(&format!("Failed to compile document: {}", e)))
}
