//! Arrival status interpretation.
//!
//! The arrival feed has no structured distance-to-station field, only a
//! free-text status such as "2분 후", "전역 도착" or "신도림 진입". We scan
//! that text for tokens meaning "previous station", "entering" or
//! "arrived". If the vendor rewords its messages the match silently stops
//! firing.

/// Coarse proximity signal derived from a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// The train is at, entering, or one stop away from the station
    ApproachingFinal,
    Unknown,
}

/// Tokens as the Seoul feed writes them
const NATIVE_TOKENS: &[&str] = &["전역", "진입", "도착"];

/// English renderings, matched case-insensitively
const ENGLISH_TOKENS: &[&str] = &["previous station", "entering", "arrived"];

/// Classify a raw status message. Empty input is `Unknown`, never an error.
pub fn classify(message: &str) -> Proximity {
    let message = message.trim();
    if message.is_empty() {
        return Proximity::Unknown;
    }

    if NATIVE_TOKENS.iter().any(|token| message.contains(token)) {
        return Proximity::ApproachingFinal;
    }

    let lower = message.to_lowercase();
    if ENGLISH_TOKENS.iter().any(|token| lower.contains(token)) {
        return Proximity::ApproachingFinal;
    }

    Proximity::Unknown
}

/// True when a message mentions the previous station; the tracking card
/// highlights these.
pub fn mentions_previous_station(message: &str) -> bool {
    message.contains("전역") || message.to_lowercase().contains("previous station")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_native_tokens() {
        assert_eq!(classify("전역 도착"), Proximity::ApproachingFinal);
        assert_eq!(classify("전역 출발"), Proximity::ApproachingFinal);
        assert_eq!(classify("신도림 진입"), Proximity::ApproachingFinal);
        assert_eq!(classify("서울 도착"), Proximity::ApproachingFinal);
    }

    #[test]
    fn test_classify_english_tokens() {
        assert_eq!(classify("entering Seoul"), Proximity::ApproachingFinal);
        assert_eq!(classify("Arrived at Seoul"), Proximity::ApproachingFinal);
        assert_eq!(classify("At PREVIOUS STATION"), Proximity::ApproachingFinal);
    }

    #[test]
    fn test_classify_other_text_is_unknown() {
        assert_eq!(classify("2 minutes"), Proximity::Unknown);
        assert_eq!(classify("3분 후"), Proximity::Unknown);
        assert_eq!(classify("3분 20초 후 (구로디지털단지)"), Proximity::Unknown);
        assert_eq!(classify("departed Sindorim"), Proximity::Unknown);
    }

    #[test]
    fn test_classify_empty_is_unknown() {
        assert_eq!(classify(""), Proximity::Unknown);
        assert_eq!(classify("   "), Proximity::Unknown);
    }

    #[test]
    fn test_mentions_previous_station() {
        assert!(mentions_previous_station("전역 도착"));
        assert!(!mentions_previous_station("신도림 진입"));
    }
}
