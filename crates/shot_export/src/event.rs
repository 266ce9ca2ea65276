//! Match event records and the flat shot record derived from them.
//!
//! Only the handful of fields the export needs are modelled; everything
//! else in an event object is ignored. All of them are optional so that a
//! missing key surfaces as a [`FieldError`] instead of a parse failure.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::ExtractError;

/// `type.id` of a shot event
pub const SHOT_EVENT_TYPE_ID: i64 = 16;

/// `shot.outcome.id` of a shot that went in
pub const GOAL_OUTCOME_ID: i64 = 97;

/// 이벤트 타입 / 슈팅 결과 분류자
///
/// Only `id` is read; `name` and any other key are ignored whatever their type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Classifier {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShotDetail {
    pub outcome: Option<Classifier>,
}

/// One element of an event file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: Option<Classifier>,
    pub location: Option<Value>,
    pub shot: Option<ShotDetail>,
}

/// Field-level problem with a single event, before the file context is known.
#[derive(Debug)]
pub enum FieldError {
    Missing(&'static str),
    LocationTooShort(usize),
    NotANumber(serde_json::Error),
}

impl FieldError {
    /// Attach file path and event index.
    pub fn at(self, path: &Path, index: usize) -> ExtractError {
        let path = path.to_path_buf();
        match self {
            FieldError::Missing(field) => ExtractError::MissingField { path, index, field },
            FieldError::LocationTooShort(len) => ExtractError::LocationTooShort { path, index, len },
            FieldError::NotANumber(source) => ExtractError::Parse { path, source },
        }
    }
}

impl RawEvent {
    pub fn type_id(&self) -> Result<i64, FieldError> {
        self.kind
            .as_ref()
            .ok_or(FieldError::Missing("type"))?
            .id
            .ok_or(FieldError::Missing("type.id"))
    }

    pub fn is_shot(&self) -> Result<bool, FieldError> {
        Ok(self.type_id()? == SHOT_EVENT_TYPE_ID)
    }

    pub fn outcome_id(&self) -> Result<i64, FieldError> {
        self.shot
            .as_ref()
            .ok_or(FieldError::Missing("shot"))?
            .outcome
            .as_ref()
            .ok_or(FieldError::Missing("shot.outcome"))?
            .id
            .ok_or(FieldError::Missing("shot.outcome.id"))
    }

    /// First two elements of `location`.
    pub fn xy(&self) -> Result<(Number, Number), FieldError> {
        let location = match &self.location {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => return Err(FieldError::Missing("location")),
            Some(other) => return Err(FieldError::NotANumber(not_an_array(other))),
        };
        if location.len() < 2 {
            return Err(FieldError::LocationTooShort(location.len()));
        }
        let x = Number::deserialize(&location[0]).map_err(FieldError::NotANumber)?;
        let y = Number::deserialize(&location[1]).map_err(FieldError::NotANumber)?;
        Ok((x, y))
    }
}

fn not_an_array(value: &Value) -> serde_json::Error {
    serde::de::Error::custom(format!("location must be an array, found {}", value))
}

/// Flattened shot: outcome plus pitch coordinates.
///
/// Coordinates stay as JSON numbers: integers are written as integers and
/// floats in their shortest round-trip form (`40.50` → `40.5`,
/// `1e-5` → `0.00001`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotRecord {
    pub is_goal: bool,
    pub x: Number,
    pub y: Number,
}

impl ShotRecord {
    /// Project a shot event. The caller has already checked `type.id`.
    pub fn from_shot_event(event: &RawEvent) -> Result<Self, FieldError> {
        let (x, y) = event.xy()?;
        let is_goal = event.outcome_id()? == GOAL_OUTCOME_ID;
        Ok(Self { is_goal, x, y })
    }

    pub fn goal_flag(&self) -> u8 {
        u8::from(self.is_goal)
    }
}
