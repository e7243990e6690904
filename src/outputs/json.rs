use crate::error::AttributionError;
use crate::model::AttributionDocument;
use crate::outputs::Artifact;

/// Lossless `{"recipes": [...]}` dump, two-space indented, non-ASCII kept as is.
pub struct JsonDump;

impl Artifact for JsonDump {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, document: &AttributionDocument) -> Result<String, AttributionError> {
        Ok(serde_json::to_string_pretty(document)?)
    }
}
