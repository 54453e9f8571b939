//! Game Image Lookup Module
//! Maps a selected game to its comment and word-cloud images.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

/// Size of each fallback image pool. Fallback indexes run `1..=FALLBACK_POOL_SIZE`.
pub const FALLBACK_POOL_SIZE: u32 = 20;

/// Which image family to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFlavor {
    Comment,
    WordCloud,
}

const COMMENT_IMAGES: [(&str, &str); 20] = [
    ("Wii Sports", "images/1.png"),
    ("Super Mario Bros.", "images/2.png"),
    ("Mario Kart Wii", "images/3.png"),
    ("Wii Sports Resort", "images/4.png"),
    ("Pokemon Red/Pokemon Blue", "images/5.png"),
    ("Tetris", "images/6.png"),
    ("New Super Mario Bros.", "images/7.png"),
    ("Wii Play", "images/8.png"),
    ("New Super Mario Bros. Wii", "images/9.png"),
    ("Duck Hunt", "images/10.png"),
    ("Nintendogs", "images/11.png"),
    ("Mario Kart DS", "images/12.png"),
    ("Pokemon Gold/Pokemon Silver", "images/13.png"),
    ("Wii Fit", "images/14.png"),
    ("Kinect Adventures!", "images/15.png"),
    ("Wii Fit Plus", "images/16.png"),
    ("Grand Theft Auto: San Andreas", "images/17.png"),
    ("Grand Theft Auto V", "images/18.png"),
    ("Super Mario World", "images/19.png"),
    ("Brain Age: Train Your Brain in Minutes a Day", "images/20.png"),
];

// The last four titles share their comment image.
const WORDCLOUD_IMAGES: [(&str, &str); 20] = [
    ("Wii Sports", "images/image1.png"),
    ("Super Mario Bros.", "images/image2.png"),
    ("Mario Kart Wii", "images/image3.png"),
    ("Wii Sports Resort", "images/image4.png"),
    ("Pokemon Red/Pokemon Blue", "images/image5.png"),
    ("Tetris", "images/image6.png"),
    ("New Super Mario Bros.", "images/image7.png"),
    ("Wii Play", "images/image8.png"),
    ("New Super Mario Bros. Wii", "images/image9.png"),
    ("Duck Hunt", "images/image10.png"),
    ("Nintendogs", "images/image11.png"),
    ("Mario Kart DS", "images/image12.png"),
    ("Pokemon Gold/Pokemon Silver", "images/image13.png"),
    ("Wii Fit", "images/image14.png"),
    ("Kinect Adventures!", "images/image15.png"),
    ("Wii Fit Plus", "images/image16.png"),
    ("Grand Theft Auto: San Andreas", "images/17.png"),
    ("Grand Theft Auto V", "images/18.png"),
    ("Super Mario World", "images/19.png"),
    ("Brain Age: Train Your Brain in Minutes a Day", "images/20.png"),
];

impl ImageFlavor {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ImageFlavor::Comment => &COMMENT_IMAGES,
            ImageFlavor::WordCloud => &WORDCLOUD_IMAGES,
        }
    }

    /// Path of fallback image `index` (1-based) in this flavor's pool.
    pub fn fallback_path(self, index: u32) -> String {
        match self {
            ImageFlavor::Comment => format!("images/{index}.png"),
            ImageFlavor::WordCloud => format!("images/image{index}.png"),
        }
    }

    /// Fixed mapping for `name`, if any.
    pub fn mapped(self, name: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(title, _)| *title == name)
            .map(|(_, path)| *path)
    }
}

/// Resolves image paths, drawing fallbacks from an injected random source.
#[derive(Debug, Clone)]
pub struct ImageLookup<R = StdRng> {
    rng: R,
}

impl ImageLookup<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ImageLookup<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Never fails: unknown or absent names get a random pool image.
    pub fn lookup(&mut self, name: Option<&str>, flavor: ImageFlavor) -> String {
        match name.and_then(|n| flavor.mapped(n)) {
            Some(path) => path.to_string(),
            None => {
                let index = self.rng.gen_range(1..=FALLBACK_POOL_SIZE);
                flavor.fallback_path(index)
            }
        }
    }
}

/// The game currently selected in the game-level view.
#[derive(Debug, Clone)]
pub struct GameSelection<R = StdRng> {
    selected: Option<String>,
    lookup: ImageLookup<R>,
}

impl<R: Rng> GameSelection<R> {
    pub fn new(lookup: ImageLookup<R>) -> Self {
        Self {
            selected: None,
            lookup,
        }
    }

    pub fn set_selected_game(&mut self, name: impl Into<String>) {
        let name = name.into();
        info!(game = %name, "selected game updated");
        self.selected = Some(name);
    }

    pub fn selected_game(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn comment_image(&mut self) -> String {
        self.lookup.lookup(self.selected.as_deref(), ImageFlavor::Comment)
    }

    pub fn wordcloud_image(&mut self) -> String {
        self.lookup
            .lookup(self.selected.as_deref(), ImageFlavor::WordCloud)
    }
}
