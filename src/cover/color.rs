//! Dominant color extraction.
//!
//! Pixels are converted to the 8-bit HSV scale (H in `0..180`, S and V in
//! `0..255`, every channel rounded to a whole number) and clustered with
//! k-means. The cluster centroid with the highest
//! `S * V` product is the "vibrant" color used for the name box and spine.

use std::collections::HashSet;

use image::{DynamicImage, GenericImageView, Rgb};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::CoverError;

pub const CLUSTER_COUNT: usize = 5;
pub const CLUSTER_RESTARTS: usize = 10;
pub const CLUSTER_SEED: u64 = 0;

/// Longest edge of the thumbnail that gets clustered.
pub const SAMPLE_EDGE: u32 = 100;

/// Above this channel sum a color counts as light and gets black text.
pub const LIGHT_THRESHOLD: u32 = 382;

const MAX_ITERATIONS: usize = 300;
const TOLERANCE: f32 = 1e-4;

pub type Point = [f32; 3];

#[derive(Debug, Clone)]
pub struct Clustering {
    pub centroids: Vec<Point>,
    pub labels: Vec<usize>,
    pub inertia: f32,
}

/// Converts to 8-bit HSV. Hue is halved to fit a byte and every channel is
/// rounded, so a hue of 359 degrees wraps to 0.
pub fn rgb_to_hsv(rgb: Rgb<u8>) -> Point {
    let [r, g, b] = rgb.0.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };
    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h = (h / 2.0).round();
    [if h >= 180.0 { h - 180.0 } else { h }, s.round(), max]
}

pub fn hsv_to_rgb(hsv: Point) -> Rgb<u8> {
    let h = (hsv[0] * 2.0).rem_euclid(360.0);
    let s = (hsv[1] / 255.0).clamp(0.0, 1.0);
    let v = (hsv[2] / 255.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |channel: f32| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

fn distance_sq(a: &Point, b: &Point) -> f32 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

fn nearest(point: &Point, centroids: &[Point]) -> (usize, f32) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, distance_sq(point, c)))
        .fold((0, f32::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn distinct_points(points: &[Point]) -> usize {
    points
        .iter()
        .map(|p| p.map(f32::to_bits))
        .collect::<HashSet<_>>()
        .len()
}

/// k-means++ seeding: each next centroid is drawn with probability
/// proportional to its squared distance from the closest chosen one.
fn seed_centroids(points: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);

    while centroids.len() < k {
        let weights: Vec<f32> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            centroids.push(points[rng.random_range(0..points.len())]);
            continue;
        }

        let mut target = rng.random_range(0.0..total);
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                chosen = i;
                break;
            }
            target -= w;
        }
        centroids.push(points[chosen]);
    }

    centroids
}

fn mean_variance(points: &[Point]) -> f32 {
    let n = points.len() as f32;
    (0..3)
        .map(|d| {
            let mean = points.iter().map(|p| p[d]).sum::<f32>() / n;
            points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f32>() / n
        })
        .sum::<f32>()
        / 3.0
}

fn lloyd(points: &[Point], mut centroids: Vec<Point>, tolerance: f32) -> Clustering {
    let k = centroids.len();
    let mut labels = vec![0usize; points.len()];

    for _ in 0..MAX_ITERATIONS {
        for (label, point) in labels.iter_mut().zip(points) {
            *label = nearest(point, &centroids).0;
        }

        let mut sums = vec![[0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (label, point) in labels.iter().zip(points) {
            for d in 0..3 {
                sums[*label][d] += f64::from(point[d]);
            }
            counts[*label] += 1;
        }

        let mut shift = 0.0;
        for (i, centroid) in centroids.iter_mut().enumerate() {
            // an emptied cluster keeps its previous centroid
            if counts[i] == 0 {
                continue;
            }
            let updated = sums[i].map(|s| (s / counts[i] as f64) as f32);
            shift += distance_sq(centroid, &updated);
            *centroid = updated;
        }

        if shift <= tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, point) in labels.iter_mut().zip(points) {
        let (index, dist) = nearest(point, &centroids);
        *label = index;
        inertia += dist;
    }

    Clustering {
        centroids,
        labels,
        inertia,
    }
}

/// Clusters `points` into at most `k` groups, keeping the run with the lowest
/// inertia out of `n_init` seeded restarts. Returns `None` for no points.
pub fn kmeans(points: &[Point], k: usize, n_init: usize, seed: u64) -> Option<Clustering> {
    if points.is_empty() || k == 0 {
        return None;
    }

    let k = k.min(distinct_points(points));
    let tolerance = TOLERANCE * mean_variance(points);
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n_init.max(1))
        .map(|_| {
            let centroids = seed_centroids(points, k, &mut rng);
            lloyd(points, centroids, tolerance)
        })
        .fold(None, |best: Option<Clustering>, run| match best {
            Some(b) if b.inertia <= run.inertia => Some(b),
            _ => Some(run),
        })
}

/// The centroid with the highest saturation times brightness. Among equal
/// scores the last one wins.
pub fn most_vibrant(centroids: &[Point]) -> Option<Point> {
    centroids
        .iter()
        .copied()
        .max_by(|a, b| (a[1] * a[2]).total_cmp(&(b[1] * b[2])))
}

/// Extracts the vibrant color of an image.
pub fn vibrant_color(image: &DynamicImage) -> Result<Rgb<u8>, CoverError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CoverError::EmptyArtwork);
    }

    let sample = if width > SAMPLE_EDGE || height > SAMPLE_EDGE {
        image.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgb8()
    } else {
        image.to_rgb8()
    };

    let points: Vec<Point> = sample.pixels().map(|p| rgb_to_hsv(*p)).collect();
    let clustering = kmeans(&points, CLUSTER_COUNT, CLUSTER_RESTARTS, CLUSTER_SEED)
        .ok_or(CoverError::EmptyArtwork)?;
    let vibrant = most_vibrant(&clustering.centroids).ok_or(CoverError::EmptyArtwork)?;

    // centroids are cut back to whole 8-bit HSV values before converting
    Ok(hsv_to_rgb(vibrant.map(f32::trunc)))
}

/// Black text on light colors, white text on dark ones.
pub fn text_color_for(background: Rgb<u8>) -> Rgb<u8> {
    let sum: u32 = background.0.iter().map(|c| u32::from(*c)).sum();
    if sum > LIGHT_THRESHOLD {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}
