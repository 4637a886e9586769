use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "yesVotes", default)]
    pub yes_votes: Option<i64>,
    // fields the moderation tables do not model are carried along as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Copy, Debug)]
pub enum IncidentAction {
    Approve,
    Resolve,
}

impl IncidentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Resolve => "resolve",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IncidentsPerDay {
    pub report_date: String,
    pub incident_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CongestionPeriod {
    pub period_start: String,
    pub traffic_incident_count: i64,
}
