//! Derived mood views over classified posts: the community mood ring, an
//! author's sentiment journey and the "current vibe".
//!
//! Everything here is pure and total. Unknown emotions score as neutral
//! instead of failing.

use crate::emotion::Emotion;
use crate::error::ConfigError;
use crate::post::ClassifiedPost;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::{trace, warn};

/// Number of recent posts the mood ring is computed over.
pub const DEFAULT_WINDOW: usize = 100;

/// Display format for trend points, e.g. `Mar 04`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d";

/// Score given to emotions that are not on the mood scale.
pub const NEUTRAL_SCORE: u8 = 5;

/// Position of `emotion` on the 1-9 mood scale.
///
/// ```
/// use lifetea::{mood::score, Emotion};
///
/// assert_eq!(score(Emotion::Happy), 9);
/// assert_eq!(score(Emotion::Frustrated), 2);
/// assert_eq!(score(Emotion::Default), 5);
/// ```
pub fn score(emotion: Emotion) -> u8 {
    match emotion {
        Emotion::Happy => 9,
        Emotion::Hopeful => 8,
        Emotion::Calm => 7,
        Emotion::Melancholy => 4,
        Emotion::Sad | Emotion::Anxious => 3,
        Emotion::Frustrated => 2,
        Emotion::Overwhelmed => 1,
        Emotion::Neutral | Emotion::Default => NEUTRAL_SCORE,
    }
}

/// One slice of the mood ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDistributionEntry {
    pub emotion: Emotion,
    pub count: usize,
    pub share: f64,
}

/// One post on an author's sentiment journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrendPoint {
    /// Calendar day (UTC) the post was written.
    pub date_bucket: NaiveDate,
    /// `date_bucket` rendered with the aggregator's date format.
    pub label: String,
    pub score: u8,
    pub emotion: Emotion,
    pub title: String,
}

/// Post and hug totals shown on an author's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub total_posts: usize,
    pub total_hugs: u64,
}

/// Everything `lifetea mood` prints for one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReport {
    /// Posts inside the mood ring window.
    pub considered: usize,
    pub dominant: Emotion,
    pub ring: Vec<MoodDistributionEntry>,
    pub current_vibe: Emotion,
    pub trend: Vec<MoodTrendPoint>,
    pub stats: AuthorStats,
}

/// Produces mood views from classified posts.
#[derive(Debug, Clone)]
pub struct MoodAggregator {
    window: usize,
    date_format: String,
}

impl Default for MoodAggregator {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl MoodAggregator {
    /// Fails on a zero window or a `date_format` that needs more than a
    /// calendar date (`%H`, `%z`, ...) or does not parse.
    pub fn new(window: usize, date_format: impl Into<String>) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        let date_format = date_format.into();
        if render_day(NaiveDate::default(), &date_format).is_none() {
            return Err(ConfigError::InvalidDateFormat(date_format));
        }
        Ok(Self {
            window,
            date_format,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Mood ring over the configured window.
    pub fn mood_ring(&self, posts: &[ClassifiedPost]) -> Vec<MoodDistributionEntry> {
        distribution(posts, self.window)
    }

    /// Sentiment journey with trend labels in the configured date format.
    pub fn trend(&self, posts: &[ClassifiedPost]) -> Vec<MoodTrendPoint> {
        trend_with_format(posts, &self.date_format)
    }

    /// Community ring over all `posts`; vibe, trend and stats over the posts
    /// written by `author`, or over everything when no author is given.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use lifetea::{ClassifiedPost, Emotion, MoodAggregator};
    ///
    /// let at = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
    /// let posts = vec![
    ///     ClassifiedPost::new("a", Emotion::Sad, at).by("ana"),
    ///     ClassifiedPost::new("b", Emotion::Happy, at).by("ben"),
    /// ];
    /// let report = MoodAggregator::default().report(&posts, Some("ana"));
    /// assert_eq!(report.considered, 2);
    /// assert_eq!(report.current_vibe, Emotion::Sad);
    /// assert_eq!(report.stats.total_posts, 1);
    /// ```
    pub fn report(&self, posts: &[ClassifiedPost], author: Option<&str>) -> MoodReport {
        let ring = self.mood_ring(posts);
        let scoped: Vec<ClassifiedPost> = match author {
            Some(author) => posts
                .iter()
                .filter(|p| p.user_id.as_deref() == Some(author))
                .cloned()
                .collect(),
            None => posts.to_vec(),
        };
        MoodReport {
            considered: ring.iter().map(|e| e.count).sum(),
            dominant: dominant_emotion(&ring),
            current_vibe: current_vibe(&scoped),
            trend: self.trend(&scoped),
            stats: author_stats(&scoped),
            ring,
        }
    }
}

/// `None` when `date_format` cannot be rendered from a date alone.
fn render_day(day: NaiveDate, date_format: &str) -> Option<String> {
    let mut label = String::new();
    write!(label, "{}", day.format(date_format)).ok()?;
    Some(label)
}

/// Ranked emotion counts over the `window` most recent posts.
///
/// Entries are ordered by count, largest first; equal counts follow the
/// declaration order of [`Emotion`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lifetea::{mood::distribution, ClassifiedPost, Emotion};
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
/// let posts: Vec<_> = [Emotion::Happy, Emotion::Happy, Emotion::Sad, Emotion::Calm]
///     .into_iter()
///     .enumerate()
///     .map(|(i, e)| ClassifiedPost::new(i.to_string(), e, at))
///     .collect();
/// let ring = distribution(&posts, 100);
/// let order: Vec<_> = ring.iter().map(|e| (e.emotion, e.count)).collect();
/// assert_eq!(order, [(Emotion::Happy, 2), (Emotion::Calm, 1), (Emotion::Sad, 1)]);
/// assert_eq!(ring[0].share, 0.5);
/// ```
pub fn distribution(posts: &[ClassifiedPost], window: usize) -> Vec<MoodDistributionEntry> {
    let mut recent: Vec<&ClassifiedPost> = posts.iter().collect();
    recent.sort_by_key(|p| Reverse(p.created_at));
    recent.truncate(window);

    let total = recent.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<Emotion, usize> = BTreeMap::new();
    for post in &recent {
        *counts.entry(post.emotion).or_default() += 1;
    }

    // BTreeMap iterates in declaration order and the sort is stable.
    let mut ring: Vec<MoodDistributionEntry> = counts
        .into_iter()
        .map(|(emotion, count)| MoodDistributionEntry {
            emotion,
            count,
            share: count as f64 / total as f64,
        })
        .collect();
    ring.sort_by_key(|e| Reverse(e.count));
    trace!(target: "mood", considered = total, slices = ring.len(), "mood ring");
    ring
}

/// Chronological mood scores for one author's posts.
///
/// Callers filter to a single author first. Posts written on the same day stay
/// separate points.
pub fn trend(posts: &[ClassifiedPost]) -> Vec<MoodTrendPoint> {
    trend_with_format(posts, DEFAULT_DATE_FORMAT)
}

/// [`trend`] with a custom `chrono` format for point labels.
///
/// A format that cannot render a plain date falls back to
/// [`DEFAULT_DATE_FORMAT`].
pub fn trend_with_format(posts: &[ClassifiedPost], date_format: &str) -> Vec<MoodTrendPoint> {
    let date_format = if render_day(NaiveDate::default(), date_format).is_some() {
        date_format
    } else {
        warn!(target: "mood", date_format, "unusable date format, using default");
        DEFAULT_DATE_FORMAT
    };
    let mut ordered: Vec<&ClassifiedPost> = posts.iter().collect();
    ordered.sort_by_key(|p| p.created_at);
    ordered
        .into_iter()
        .map(|p| {
            let day = p.created_at.date_naive();
            MoodTrendPoint {
                date_bucket: day,
                label: render_day(day, date_format).unwrap_or_default(),
                score: score(p.emotion),
                emotion: p.emotion,
                title: p.title.clone(),
            }
        })
        .collect()
}

/// Mean score per calendar day, oldest first.
///
/// This is opt-in; [`trend`] itself never collapses days.
pub fn daily_average(points: &[MoodTrendPoint]) -> Vec<(NaiveDate, f64)> {
    let mut days: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();
    for p in points {
        let (sum, n) = days.entry(p.date_bucket).or_default();
        *sum += u32::from(p.score);
        *n += 1;
    }
    days.into_iter()
        .map(|(day, (sum, n))| (day, f64::from(sum) / n as f64))
        .collect()
}

/// Emotion of the most recently created post, or `Neutral` when there are
/// none.
///
/// This is the latest mood, not the most frequent one.
pub fn current_vibe(posts: &[ClassifiedPost]) -> Emotion {
    posts
        .iter()
        .fold(None::<&ClassifiedPost>, |latest, p| match latest {
            Some(l) if p.created_at <= l.created_at => Some(l),
            _ => Some(p),
        })
        .map_or(Emotion::Neutral, |p| p.emotion)
}

/// Centre label of the mood ring: the top slice, or `Calm` for an empty ring.
pub fn dominant_emotion(ring: &[MoodDistributionEntry]) -> Emotion {
    ring.first().map_or(Emotion::Calm, |e| e.emotion)
}

pub fn author_stats(posts: &[ClassifiedPost]) -> AuthorStats {
    AuthorStats {
        total_posts: posts.len(),
        total_hugs: posts.iter().map(|p| p.hug_count).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, emotion: Emotion, day: u32, hour: u32) -> ClassifiedPost {
        let at = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
        ClassifiedPost::new(id, emotion, at)
    }

    #[test]
    fn window_keeps_most_recent() {
        let posts = vec![
            post("old", Emotion::Sad, 1, 0),
            post("new", Emotion::Happy, 3, 0),
            post("mid", Emotion::Calm, 2, 0),
        ];
        let ring = distribution(&posts, 2);
        let emotions: Vec<_> = ring.iter().map(|e| e.emotion).collect();
        assert_eq!(emotions, [Emotion::Happy, Emotion::Calm]);
        assert_eq!(ring.iter().map(|e| e.count).sum::<usize>(), 2);
    }

    #[test]
    fn same_day_posts_are_separate_points() {
        let posts = vec![post("a", Emotion::Sad, 4, 9), post("b", Emotion::Happy, 4, 18)];
        let points = trend(&posts);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Mar 04");
        assert_eq!(daily_average(&points), vec![(points[0].date_bucket, 6.0)]);
    }

    #[test]
    fn custom_date_format() {
        let agg = MoodAggregator::new(10, "%Y-%m-%d").unwrap();
        let points = agg.trend(&[post("a", Emotion::Calm, 5, 0)]);
        assert_eq!(points[0].label, "2024-03-05");
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(
            MoodAggregator::new(0, DEFAULT_DATE_FORMAT).unwrap_err(),
            ConfigError::EmptyWindow
        );
    }

    #[test]
    fn time_of_day_format_is_rejected() {
        for bad in ["%H:%M", "%b %d %z", "%Q"] {
            assert_eq!(
                MoodAggregator::new(10, bad).unwrap_err(),
                ConfigError::InvalidDateFormat(bad.into())
            );
        }
        assert!(MoodAggregator::new(10, "%A %e %B %Y").is_ok());
    }

    #[test]
    fn unusable_format_falls_back_to_default() {
        let points = trend_with_format(&[post("a", Emotion::Calm, 5, 14)], "%H:%M");
        assert_eq!(points[0].label, "Mar 05");
    }

    #[test]
    fn dominant_defaults_to_calm() {
        assert_eq!(dominant_emotion(&[]), Emotion::Calm);
    }

    #[test]
    fn stats_sum_hugs() {
        let posts = vec![
            post("a", Emotion::Sad, 1, 0).with_hugs(2),
            post("b", Emotion::Happy, 2, 0).with_hugs(5),
        ];
        assert_eq!(
            author_stats(&posts),
            AuthorStats {
                total_posts: 2,
                total_hugs: 7
            }
        );
    }
}
