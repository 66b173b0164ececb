//! The gap/spike/blank text file written by the external waveform checker.
//!
//! Blocks are separated by an empty line: last-update, blanks, gaps, spikes.
//! Each list block starts with a title line that is dropped.

use std::fs;

use actix_web::{web, HttpResponse};
use common::model::checklist::WaveformFeed;
use log::error;
use serde_json::json;

use crate::config::AppConfig;

pub fn parse_feed(text: &str) -> WaveformFeed {
    let text = text.replace("\r\n", "\n");
    let blocks: Vec<&str> = text.split("\n\n").collect();
    let list = |index: usize| {
        blocks
            .get(index)
            .map(|block| block.split('\n').skip(1).collect::<Vec<_>>().join("\n"))
            .unwrap_or_default()
    };

    WaveformFeed {
        last_update: blocks
            .first()
            .map(|block| block.split(' ').skip(1).collect::<Vec<_>>().join(" "))
            .unwrap_or_default(),
        blanks: list(1),
        gaps: list(2),
        spikes: list(3),
    }
}

pub async fn process(config: web::Data<AppConfig>) -> HttpResponse {
    match fs::read_to_string(&config.checklist_feed) {
        Ok(text) => HttpResponse::Ok().json(parse_feed(&text)),
        Err(e) => {
            error!("Cannot read {}: {}", config.checklist_feed.display(), e);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Cannot read {}: {}", config.checklist_feed.display(), e)
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_map_to_lists() {
        let text = "Updated: 2024-12-11 06:00:01 UTC\n\n\
                    Blank stations:\nAAI\nBBJI\n\n\
                    Gap stations:\nCCM\n\n\
                    Spike stations:\nDDI\nEEI";
        let feed = parse_feed(text);
        assert_eq!(feed.last_update, "2024-12-11 06:00:01 UTC");
        assert_eq!(feed.blanks, "AAI\nBBJI");
        assert_eq!(feed.gaps, "CCM");
        assert_eq!(feed.spikes, "DDI\nEEI");
    }

    #[test]
    fn missing_blocks_are_empty() {
        let feed = parse_feed("Updated: now\r\n\r\nBlank stations:\r\nAAI");
        assert_eq!(feed.last_update, "now");
        assert_eq!(feed.blanks, "AAI");
        assert_eq!(feed.gaps, "");
        assert_eq!(feed.spikes, "");
    }
}
