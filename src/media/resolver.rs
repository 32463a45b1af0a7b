//! Media resolution for track preview thumbnails.
//!
//! Given a track's source URL this module extracts the canonical video
//! identifier and walks a prioritized chain of preview image candidates,
//! advancing on load failure until one loads or the chain is exhausted.
//! The whole thing is a plain state machine with no I/O: the consumer
//! reports load outcomes and user actions, the resolver decides what to
//! show next.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Accepted URL shapes, most specific first. The last pattern accepts
    /// a bare 11-character video identifier.
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .unwrap(),
        Regex::new(r"^([A-Za-z0-9_-]{11})$").unwrap(),
    ];
}

/// Extracts the canonical video identifier from a source URL.
///
/// The first matching pattern wins. Returns `None` when the input does
/// not look like any accepted URL shape.
pub fn extract_video_id(source_url: &str) -> Option<String> {
    for pattern in VIDEO_ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(source_url) {
            if let Some(id) = captures.get(1) {
                return Some(id.as_str().to_string());
            }
        }
    }
    None
}

/// The identifier-derived preview images, highest expected resolution
/// first. Each is a deterministic function of the video id only.
pub fn thumbnail_candidates(video_id: &str) -> Vec<String> {
    vec![
        format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", video_id),
        format!("https://i.ytimg.com/vi/{}/sddefault.jpg", video_id),
        format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id),
        format!("https://img.youtube.com/vi/{}/0.jpg", video_id),
    ]
}

/// The URL the embedded player is addressed by once playback starts.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=1", video_id)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolverState {
    /// The source URL yielded no video identifier. Terminal, the consumer
    /// renders an inline error and no candidate is ever attempted.
    InvalidSource,
    /// Waiting for the load outcome of the candidate at this index.
    Attempting(usize),
    /// The candidate at this index loaded, it stays displayed.
    Loaded(usize),
    /// Every candidate failed. The consumer keeps its loading indicator.
    Exhausted,
    /// The preview surface was replaced by the embedded player. One-way.
    Playing,
}

/// Per-track resolution state machine.
///
/// Each instance is independent: it owns its candidate chain and index,
/// so a failure in one track's resolution cannot affect another's.
pub struct MediaResolver {
    video_id: Option<String>,
    candidates: Vec<String>,
    /// Index of the first identifier-derived candidate within
    /// `candidates`: 1 when a custom cover occupies slot 0, else 0.
    first_derived: usize,
    state: ResolverState,
    detached: bool,
}

impl MediaResolver {
    /// Builds a resolver for the given source URL and optional custom
    /// cover. An empty cover string counts as no cover.
    pub fn new(source_url: &str, custom_cover: Option<&str>) -> Self {
        let mut resolver = MediaResolver {
            video_id: None,
            candidates: Vec::new(),
            first_derived: 0,
            state: ResolverState::InvalidSource,
            detached: false,
        };
        resolver.derive(source_url, custom_cover);
        resolver
    }

    fn derive(&mut self, source_url: &str, custom_cover: Option<&str>) {
        let custom_cover = custom_cover.filter(|c| !c.is_empty());
        match extract_video_id(source_url) {
            Some(video_id) => {
                let mut candidates = Vec::new();
                if let Some(cover) = custom_cover {
                    candidates.push(cover.to_string());
                }
                self.first_derived = candidates.len();
                candidates.extend(thumbnail_candidates(&video_id));
                self.video_id = Some(video_id);
                self.candidates = candidates;
                self.state = ResolverState::Attempting(0);
            }
            None => {
                self.video_id = None;
                self.candidates = Vec::new();
                self.first_derived = 0;
                self.state = ResolverState::InvalidSource;
            }
        }
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// The candidate image the consumer should currently be loading or
    /// displaying, if any.
    pub fn current_candidate(&self) -> Option<&str> {
        match self.state {
            ResolverState::Attempting(index) | ResolverState::Loaded(index) => {
                self.candidates.get(index).map(String::as_str)
            }
            _ => None,
        }
    }

    /// The embedded player URL, available once playback started.
    pub fn player_url(&self) -> Option<String> {
        match self.state {
            ResolverState::Playing => self.video_id.as_deref().map(embed_url),
            _ => None,
        }
    }

    /// The current candidate loaded. It stays displayed, no further
    /// attempts are made.
    pub fn load_succeeded(&mut self) {
        if self.detached {
            return;
        }
        if let ResolverState::Attempting(index) = self.state {
            self.state = ResolverState::Loaded(index);
        }
    }

    /// The current candidate failed to load. A failed custom cover
    /// restarts the chain at the first identifier-derived candidate,
    /// any other failure advances; running past the last candidate
    /// leaves the resolver exhausted.
    pub fn load_failed(&mut self) {
        if self.detached {
            return;
        }
        let index = match self.state {
            ResolverState::Attempting(index) => index,
            _ => return,
        };
        let next = if self.first_derived > 0 && index < self.first_derived {
            self.first_derived
        } else {
            index + 1
        };
        self.state = if next < self.candidates.len() {
            ResolverState::Attempting(next)
        } else {
            ResolverState::Exhausted
        };
    }

    /// User pressed play. Valid from any preview state with a resolved
    /// identifier; the transition is one-way within this instance.
    pub fn play(&mut self) {
        if self.detached {
            return;
        }
        match self.state {
            ResolverState::Attempting(_)
            | ResolverState::Loaded(_)
            | ResolverState::Exhausted => {
                self.state = ResolverState::Playing;
            }
            ResolverState::InvalidSource | ResolverState::Playing => {}
        }
    }

    /// The source URL or custom cover changed: the whole machine resets
    /// for the new inputs.
    pub fn set_inputs(&mut self, source_url: &str, custom_cover: Option<&str>) {
        if self.detached {
            return;
        }
        self.derive(source_url, custom_cover);
    }

    /// Marks the consumer as removed. Any event arriving afterwards
    /// (e.g. the outcome of an in-flight image fetch) is a no-op.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}
