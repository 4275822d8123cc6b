//! Real-time feed records
//!
//! One row of the station arrival feed (`ArrivalRecord`) and one row of the
//! line-wide position feed (`PositionRecord`). Both are fetched fresh on
//! every poll and never stored beyond it.

use serde::Deserialize;

/// Feed fields arrive as JSON strings or numbers depending on the endpoint,
/// and are sometimes null. Normalize all of them to a `String`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct LenientStringVisitor;

    impl<'de> Visitor<'de> for LenientStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.trim().to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientStringVisitor)
}

fn arrival_code<'de, D>(deserializer: D) -> Result<ArrivalCode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_string(deserializer).map(|raw| ArrivalCode::from_code(&raw))
}

fn train_status<'de, D>(deserializer: D) -> Result<TrainStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_string(deserializer).map(|raw| TrainStatus::from_code(&raw))
}

fn direction<'de, D>(deserializer: D) -> Result<Direction, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_string(deserializer).map(|raw| Direction::parse(&raw))
}

/// Travel direction as reported by the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    InnerLoop,
    OuterLoop,
    #[default]
    Unknown,
}

impl Direction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "상행" | "0" => Direction::Up,
            "하행" | "1" => Direction::Down,
            "내선" => Direction::InnerLoop,
            "외선" => Direction::OuterLoop,
            other => match other.to_ascii_lowercase().as_str() {
                "up" => Direction::Up,
                "down" => Direction::Down,
                "inner" => Direction::InnerLoop,
                "outer" => Direction::OuterLoop,
                _ => Direction::Unknown,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::InnerLoop => "Inner",
            Direction::OuterLoop => "Outer",
            Direction::Unknown => "?",
        }
    }

    /// Up and inner-loop trains share one badge color, down and outer another.
    pub fn is_ascending(&self) -> bool {
        matches!(self, Direction::Up | Direction::InnerLoop)
    }
}

/// Arrival code of a station feed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrivalCode {
    Entering,
    Arrived,
    Departed,
    #[default]
    Running,
}

impl ArrivalCode {
    pub fn from_code(raw: &str) -> Self {
        match raw {
            "0" => ArrivalCode::Entering,
            "1" => ArrivalCode::Arrived,
            "2" => ArrivalCode::Departed,
            _ => ArrivalCode::Running,
        }
    }
}

/// Train status of a position feed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainStatus {
    Entering,
    Arrived,
    #[default]
    Departed,
}

impl TrainStatus {
    /// Unrecognized codes count as departed.
    pub fn from_code(raw: &str) -> Self {
        match raw {
            "0" => TrainStatus::Entering,
            "1" => TrainStatus::Arrived,
            _ => TrainStatus::Departed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrainStatus::Entering => "entering",
            TrainStatus::Arrived => "arrived",
            TrainStatus::Departed => "departed",
        }
    }
}

/// One row of a station's real-time arrival feed
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ArrivalRecord {
    #[serde(rename = "subwayId", deserialize_with = "lenient_string", default)]
    pub line_id: String,
    #[serde(
        rename = "btrainNo",
        alias = "trainNo",
        deserialize_with = "lenient_string",
        default
    )]
    pub train_id: String,
    #[serde(rename = "updnLine", deserialize_with = "direction", default)]
    pub direction: Direction,
    #[serde(rename = "trainLineNm", deserialize_with = "lenient_string", default)]
    pub destination_display: String,
    #[serde(rename = "arvlMsg2", deserialize_with = "lenient_string", default)]
    pub status_message: String,
    #[serde(rename = "arvlMsg3", deserialize_with = "lenient_string", default)]
    pub current_location: String,
    #[serde(rename = "arvlCd", deserialize_with = "arrival_code", default)]
    pub arrival_code: ArrivalCode,
    /// Display only; never used to decide proximity.
    #[serde(rename = "barvlDt", deserialize_with = "lenient_string", default)]
    pub seconds_to_arrival: String,
    #[serde(rename = "recptnDt", deserialize_with = "lenient_string", default)]
    pub data_timestamp: String,
}

/// One row of a line-wide real-time position feed
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PositionRecord {
    #[serde(rename = "subwayId", deserialize_with = "lenient_string", default)]
    pub line_id: String,
    #[serde(rename = "trainNo", deserialize_with = "lenient_string", default)]
    pub train_id: String,
    #[serde(rename = "statnNm", deserialize_with = "lenient_string", default)]
    pub current_station: String,
    #[serde(rename = "trainSttus", deserialize_with = "train_status", default)]
    pub train_status: TrainStatus,
    #[serde(rename = "statnTnm", deserialize_with = "lenient_string", default)]
    pub terminal_station: String,
}

impl PositionRecord {
    /// Location line shown while tracking, e.g. "Hapjeong entering".
    pub fn describe(&self) -> String {
        format!("{} {}", self.current_station, self.train_status.label())
    }
}
