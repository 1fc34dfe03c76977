#![allow(dead_code)]

use async_trait::async_trait;
use recipe_cards::config::{AppConfig, SiteConfig};
use recipe_cards::layout::{Dimensions, ImageLoad, ImageLoader};
use recipe_cards::Host;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Confirm(String),
    Alert(String),
    Navigate(String),
    Print(String),
}

/// Host double that answers confirmations with a fixed reply and records every call
pub struct RecordingHost {
    pub accept: bool,
    pub viewport: u32,
    pub heights: HashMap<String, u32>,
    events: RefCell<Vec<Event>>,
}

impl RecordingHost {
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            viewport: 800,
            heights: HashMap::new(),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn with_height(mut self, selector: &str, height: u32) -> Self {
        self.heights.insert(selector.to_string(), height);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn printed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Print(doc) => Some(doc),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn confirm(&self, message: &str) -> bool {
        self.events
            .borrow_mut()
            .push(Event::Confirm(message.to_string()));
        self.accept
    }

    fn alert(&self, message: &str) {
        self.events.borrow_mut().push(Event::Alert(message.to_string()));
    }

    fn navigate(&self, path: &str) {
        self.events.borrow_mut().push(Event::Navigate(path.to_string()));
    }

    fn print(&self, document: &str) {
        self.events.borrow_mut().push(Event::Print(document.to_string()));
    }

    fn viewport_height(&self) -> u32 {
        self.viewport
    }

    fn element_height(&self, selector: &str) -> u32 {
        self.heights.get(selector).copied().unwrap_or(0)
    }
}

/// Every image loads immediately at 4:3
pub struct InstantLoader;

#[async_trait]
impl ImageLoader for InstantLoader {
    async fn load(&self, _src: &str) -> ImageLoad {
        ImageLoad::Loaded(Some(Dimensions {
            width: 400,
            height: 300,
        }))
    }
}

pub fn config_for(base_url: &str) -> AppConfig {
    AppConfig {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        ..AppConfig::default()
    }
}

/// Signature and IHDR chunk of a PNG, enough for size detection
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}
