//! Front-door for free-form chat messages.
//!
//! Off-topic messages get a canned redirect instead of a fabricated profile.

use crate::{error::FloatChatError, pipeline::{self, Profile}};

pub const OCEAN_KEYWORDS: [&str; 17] = [
    "ocean",
    "salinity",
    "temperature",
    "depth",
    "profile",
    "float",
    "sea",
    "pressure",
    "current",
    "marine",
    "water",
    "chlorophyll",
    "ph",
    "conductivity",
    "argo",
    "latitude",
    "longitude",
];

const FALLBACK_REPLY: &str = "Hi! 👋 I'm FloatChat, your assistant for analyzing oceanographic float data. \
It looks like your question isn't related to ocean data. \
Please ask me about ocean profiles, salinity, temperature, or other oceanographic topics!";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Profile(Box<Profile>),
    OffTopic(&'static str),
}

/// Substring match against [`OCEAN_KEYWORDS`], case-insensitive.
pub fn is_ocean_data_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    OCEAN_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn fallback_reply() -> &'static str {
    FALLBACK_REPLY
}

pub fn respond(text: &str) -> Result<ChatReply, FloatChatError> {
    if is_ocean_data_query(text) {
        Ok(ChatReply::Profile(Box::new(pipeline::generate_profile(text)?)))
    } else {
        Ok(ChatReply::OffTopic(fallback_reply()))
    }
}
