//! Playlist - the fixed, ordered list of selectable videos

use crate::{Error, Result, VideoItem};
use serde::Serialize;
use url::Url;

/// One rendered row of the playlist view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub index: usize,
    pub video: String,
    pub poster: String,
    pub active: bool,
}

/// Fixed, non-empty sequence of videos supplied at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<VideoItem>,
}

impl Playlist {
    /// Create a playlist; rejects an empty list
    pub fn new(items: Vec<VideoItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::PlaylistEmpty);
        }
        Ok(Self { items })
    }

    /// Parse a JSON array of `{ "video", "next"?, "poster"? }` objects
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<VideoItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Chain every item without a declared successor to the one after it
    pub fn linked(self) -> Self {
        let successors: Vec<Option<Url>> = self
            .items
            .iter()
            .skip(1)
            .map(|item| Some(item.video().clone()))
            .chain(std::iter::once(None))
            .collect();

        let items = self
            .items
            .into_iter()
            .zip(successors)
            .map(|(item, successor)| match (item.next(), successor) {
                (None, Some(url)) => item.with_next_url(url),
                _ => item,
            })
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&VideoItem> {
        self.items.get(index).ok_or(Error::PlaylistIndex {
            index,
            len: self.items.len(),
        })
    }

    pub fn first(&self) -> &VideoItem {
        &self.items[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoItem> {
        self.items.iter()
    }

    /// Index of the item whose manifest is `url`
    pub fn position_of(&self, url: &Url) -> Option<usize> {
        self.items.iter().position(|item| item.video() == url)
    }

    pub fn find(&self, url: &Url) -> Option<&VideoItem> {
        self.items.iter().find(|item| item.video() == url)
    }

    /// Resolve the successor of `item`.
    ///
    /// A successor that is not part of the playlist becomes a transient item
    /// sharing the current poster.
    pub fn successor_of(&self, item: &VideoItem) -> Option<VideoItem> {
        let next = item.next()?;
        match self.find(next) {
            Some(found) => Some(found.clone()),
            None => VideoItem::new(next.as_str(), item.poster()).ok(),
        }
    }

    /// View model for rendering, flagging the current item
    pub fn entries(&self, current: Option<&VideoItem>) -> Vec<PlaylistEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| PlaylistEntry {
                index,
                video: item.video().to_string(),
                poster: item.poster().to_string(),
                active: current.is_some_and(|c| c.video() == item.video()),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a VideoItem;
    type IntoIter = std::slice::Iter<'a, VideoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
