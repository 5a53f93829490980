// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned reply pools, one per inbound content category.

use rand::Rng;

use covey_config::ReplyConfig;

/// Which reply pool an inbound message draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Text,
    Image,
    Audio,
    Document,
}

impl ReplyCategory {
    /// Map a declared media MIME type to its reply category.
    ///
    /// Anything that is neither image nor audio (video, PDFs, archives,
    /// stickers served as webp fall under image) gets the document pool.
    pub fn for_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        if essence.starts_with("image/") {
            Self::Image
        } else if essence.starts_with("audio/") {
            Self::Audio
        } else {
            Self::Document
        }
    }
}

/// Reply pools with built-in defaults, overridable per category from config.
pub struct ReplyPools {
    text: Vec<String>,
    image: Vec<String>,
    audio: Vec<String>,
    document: Vec<String>,
}

impl Default for ReplyPools {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            text: owned(&[
                "Hey! Saw your message, will get back to you soon.",
                "Thanks for reaching out!",
                "Got it, give me a moment.",
                "Interesting, tell me more.",
                "On it!",
            ]),
            image: owned(&[
                "Nice picture!",
                "Thanks for the photo, taking a look now.",
                "Got the image, thanks!",
            ]),
            audio: owned(&[
                "Got your voice note, will listen shortly.",
                "Thanks for the audio!",
            ]),
            document: owned(&[
                "File received, thanks!",
                "Got the attachment, will check it out.",
            ]),
        }
    }
}

impl ReplyPools {
    /// Build pools from config overrides. An empty list in the config keeps
    /// the built-in pool for that category, so every pool is non-empty.
    pub fn from_config(config: &ReplyConfig) -> Self {
        let mut pools = Self::default();
        if !config.text.is_empty() {
            pools.text = config.text.clone();
        }
        if !config.image.is_empty() {
            pools.image = config.image.clone();
        }
        if !config.audio.is_empty() {
            pools.audio = config.audio.clone();
        }
        if !config.document.is_empty() {
            pools.document = config.document.clone();
        }
        pools
    }

    pub fn pool(&self, category: ReplyCategory) -> &[String] {
        match category {
            ReplyCategory::Text => &self.text,
            ReplyCategory::Image => &self.image,
            ReplyCategory::Audio => &self.audio,
            ReplyCategory::Document => &self.document,
        }
    }

    /// Pick one reply uniformly from the category's pool.
    pub fn pick<R: Rng>(&self, rng: &mut R, category: ReplyCategory) -> &str {
        let pool = self.pool(category);
        &pool[rng.gen_range(0..pool.len())]
    }

    /// Pick one reply with the thread-local generator.
    pub fn pick_any(&self, category: ReplyCategory) -> String {
        self.pick(&mut rand::thread_rng(), category).to_string()
    }
}
