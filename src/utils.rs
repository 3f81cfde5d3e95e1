/// Extract the display identifier from a fully-qualified resource name:
/// everything after the last `/`. Names without a `/` pass through unchanged.
pub fn resource_name(arn: &str) -> &str {
    arn.split('/').next_back().unwrap_or(arn)
}
