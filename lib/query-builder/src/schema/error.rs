#[derive(Debug, thiserror::Error)]
pub enum SchemaMetadataError {
    #[error("Failed to read schema metadata from '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid schema metadata: {0}")]
    Json(#[from] serde_json::Error),
}
