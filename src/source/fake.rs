//! Scripted in-memory source for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::ArrivalSource;
use crate::error::DataUnavailable;
use crate::models::{ArrivalRecord, PositionRecord};

enum Reply<T> {
    Rows(Vec<T>),
    Fail(String),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<Vec<T>, DataUnavailable> {
        match self {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Fail(message) => Err(DataUnavailable::Upstream {
                code: "TEST-500".to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// Per-key queue of replies. The last reply repeats once the queue drains;
/// unknown keys answer with an empty list.
struct Script<T> {
    replies: HashMap<String, VecDeque<Reply<T>>>,
    calls: Vec<String>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Vec::new(),
        }
    }

    fn push(&mut self, key: &str, reply: Reply<T>) {
        self.replies.entry(key.to_string()).or_default().push_back(reply);
    }

    fn next(&mut self, key: &str) -> Result<Vec<T>, DataUnavailable> {
        self.calls.push(key.to_string());
        let Some(queue) = self.replies.get_mut(key) else {
            return Ok(Vec::new());
        };
        if queue.len() > 1 {
            if let Some(reply) = queue.pop_front() {
                return reply.produce();
            }
        }
        match queue.front() {
            Some(reply) => reply.produce(),
            None => Ok(Vec::new()),
        }
    }
}

pub struct FakeSource {
    arrivals: Mutex<Script<ArrivalRecord>>,
    positions: Mutex<Script<PositionRecord>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            arrivals: Mutex::new(Script::new()),
            positions: Mutex::new(Script::new()),
        }
    }

    pub fn push_arrivals(&self, station: &str, rows: Vec<ArrivalRecord>) {
        self.arrivals.lock().unwrap().push(station, Reply::Rows(rows));
    }

    pub fn fail_arrivals(&self, station: &str, message: &str) {
        self.arrivals
            .lock()
            .unwrap()
            .push(station, Reply::Fail(message.to_string()));
    }

    pub fn push_positions(&self, line_id: &str, rows: Vec<PositionRecord>) {
        self.positions.lock().unwrap().push(line_id, Reply::Rows(rows));
    }

    pub fn fail_positions(&self, line_id: &str, message: &str) {
        self.positions
            .lock()
            .unwrap()
            .push(line_id, Reply::Fail(message.to_string()));
    }

    /// Station names requested so far, in order
    pub fn arrival_calls(&self) -> Vec<String> {
        self.arrivals.lock().unwrap().calls.clone()
    }

    pub fn position_calls(&self) -> Vec<String> {
        self.positions.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl ArrivalSource for FakeSource {
    async fn fetch_station_arrivals(
        &self,
        station: &str,
    ) -> Result<Vec<ArrivalRecord>, DataUnavailable> {
        self.arrivals.lock().unwrap().next(station)
    }

    async fn fetch_line_positions(
        &self,
        line_id: &str,
    ) -> Result<Vec<PositionRecord>, DataUnavailable> {
        self.positions.lock().unwrap().next(line_id)
    }
}

/// Arrival row for `train_id` on `line_id` with the given status text
pub fn arrival(line_id: &str, train_id: &str, message: &str) -> ArrivalRecord {
    ArrivalRecord {
        line_id: line_id.to_string(),
        train_id: train_id.to_string(),
        destination_display: "성수행 - 신도림방면".to_string(),
        status_message: message.to_string(),
        ..Default::default()
    }
}

/// Position row for `train_id` at `station`
pub fn position(line_id: &str, train_id: &str, station: &str, status: &str) -> PositionRecord {
    PositionRecord {
        line_id: line_id.to_string(),
        train_id: train_id.to_string(),
        current_station: station.to_string(),
        train_status: crate::models::TrainStatus::from_code(status),
        terminal_station: "성수".to_string(),
    }
}
