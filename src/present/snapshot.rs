// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serializable payload of a [`RenderModel`](super::RenderModel), suitable for embedding into a
//! generated document.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub meta: SnapshotMeta,
    pub subjects: BTreeMap<String, SubjectSnapshot>,
    pub courses: Vec<CourseSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub start_min: u16,
    pub end_min: u16,
    pub days: Vec<DaySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DaySnapshot {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectSnapshot {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshot {
    pub id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub subject_credits: u32,
    pub course_code: String,
    pub day: String,
    pub start_min: u16,
    pub end_min: u16,
    pub time_str: String,
}

/// JSON schema of [`RenderSnapshot`].
pub fn snapshot_json_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(RenderSnapshot);
    serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
}
