use serde::Serialize;

/// What [`codec::write`](crate::index::codec::write) put on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub entries: u64,
    #[serde(rename = "distinctKeys")]
    pub distinct_keys: u64,
    #[serde(rename = "keyBytes")]
    pub key_bytes: u64,
}

/// Shape of a loaded index, as reported by `bri show --summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub version: u64,
    pub entries: u64,
    #[serde(rename = "distinctKeys")]
    pub distinct_keys: u64,
    #[serde(rename = "keyBytes")]
    pub key_bytes: u64,
}

/// Outcome of the `bri test` self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub entries: u64,
    #[serde(rename = "distinctKeys")]
    pub distinct_keys: u64,
    #[serde(rename = "recordsChecked")]
    pub records_checked: u64,
}

/// One timed round of `bri benchmark`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkTrial {
    pub trial: usize,
    pub lookups: usize,
    pub records: u64,
    pub bases: u64,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: f64,
}
