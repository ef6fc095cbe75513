use serde::Serialize;

/// Static catalog entry; `date` is the `YYYY-MM-DD` day it is scheduled for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: i64,
    pub title: &'static str,
    pub description: &'static str,
    pub fun_fact: &'static str,
    pub date: &'static str,
}
