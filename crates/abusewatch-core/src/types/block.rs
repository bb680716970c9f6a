use serde::Deserialize;

/// Top-level envelope of the `check-block` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CheckBlockResponse {
    /// Payload under the `data` key
    pub data: CheckBlockData,
}

/// Body of a `check-block` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBlockData {
    /// Base address of the queried block
    #[serde(default)]
    pub network_address: String,

    /// Netmask of the queried block
    #[serde(default)]
    pub netmask: String,

    /// First address in the block
    #[serde(default)]
    pub min_address: String,

    /// Last address in the block
    #[serde(default)]
    pub max_address: String,

    /// Number of addressable hosts in the block
    #[serde(default)]
    pub num_possible_hosts: u64,

    /// Human-readable description of the address space
    #[serde(default)]
    pub address_space_desc: String,

    /// Addresses in the block with recent abuse reports
    #[serde(default)]
    pub reported_address: Vec<ReportedAddress>,
}

/// One reported address entry from the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedAddress {
    /// The reported IP address
    pub ip_address: String,

    /// Number of abuse reports filed against the address
    #[serde(default)]
    pub num_reports: u32,

    /// Timestamp of the most recent report, as sent by the API
    #[serde(default)]
    pub most_recent_report: String,

    /// Abuse confidence score (0-100)
    #[serde(default)]
    pub abuse_confidence_score: u8,

    /// Two-letter country code, absent for unattributed addresses
    #[serde(default)]
    pub country_code: Option<String>,
}
