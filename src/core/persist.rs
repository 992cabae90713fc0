use crate::domain::{FactRecord, Storage};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub const DEFAULT_OUTPUT_FILE: &str = "meowfacts_dataset.json";

/// Pretty-printed JSON array with four-space indentation. Non-ASCII text is
/// written as UTF-8, not as `\u` escapes.
pub fn to_pretty_json(records: &[FactRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes `records` to `file_name`, replacing whatever was there.
pub async fn save<S: Storage>(
    storage: &S,
    file_name: &str,
    records: &[FactRecord],
) -> Result<String> {
    let location = storage.describe(file_name);
    tracing::info!("💾 Saving {} records to '{}'...", records.len(), location);

    let data = to_pretty_json(records)?;
    tracing::debug!("Writing {} bytes to storage", data.len());
    storage.write_file(file_name, &data).await?;

    tracing::info!("Successfully saved data.");
    Ok(location)
}

pub async fn load<S: Storage>(storage: &S, file_name: &str) -> Result<Vec<FactRecord>> {
    let data = storage.read_file(file_name).await?;
    let records = serde_json::from_slice(&data)?;
    Ok(records)
}
