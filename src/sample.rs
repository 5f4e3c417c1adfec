//! Demonstration images shown when the sample-data toggle is on.

use crate::models::{Category, Image};
use chrono::{Duration, Utc};

const SAMPLES: [(&str, &str, &str, &str, Category, bool); 5] = [
    (
        "sample-1",
        "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?w=800",
        "Ancient Temple in Bamboo Forest",
        "A serene ancient Japanese temple nestled within a lush bamboo forest, soft golden light filtering through the leaves, peaceful atmosphere with floating cherry blossoms, warm color palette, dreamlike quality",
        Category::Temples,
        true,
    ),
    (
        "sample-2",
        "https://images.unsplash.com/photo-1528164344705-47542687000d?w=800",
        "Coastal Village at Sunset",
        "A quaint Japanese coastal village bathed in warm sunset hues, fishing boats gently swaying in the harbor, traditional wooden houses with curved roofs, seagulls soaring overhead, vibrant oranges and purples",
        Category::Coastal,
        false,
    ),
    (
        "sample-3",
        "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e?w=800",
        "Rice Fields and Farmhouse",
        "Terraced rice fields stretching across rolling hills, a traditional farmhouse with thatched roof, morning mist rising from the paddies, distant mountains silhouetted against a pastel sky",
        Category::Countryside,
        true,
    ),
    (
        "sample-4",
        "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
        "Tokyo Street in Rain",
        "A bustling Tokyo street scene in gentle rain, neon signs reflecting on wet pavement, people with colorful umbrellas, vending machines glowing warmly, blend of modern and traditional elements",
        Category::Cities,
        false,
    ),
    (
        "sample-5",
        "https://images.unsplash.com/photo-1478436127897-769e1b3f0f36?w=800",
        "Mountain Shrine Path",
        "A winding stone path leading to a mountaintop shrine, red torii gates ascending through misty forest, lanterns softly glowing, autumn leaves scattered on steps, warm and inviting atmosphere",
        Category::Temples,
        false,
    ),
];

/// Builds the sample images, the n-th one dated n days ago.
pub fn sample_images() -> Vec<Image> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .zip(1..)
        .map(|(&(id, url, title, prompt, category, favorite), days)| Image {
            id: id.to_string(),
            image_url: url.to_string(),
            title: title.to_string(),
            enhanced_prompt: prompt.to_string(),
            category,
            created_at: now - Duration::days(days),
            is_favorite: favorite,
        })
        .collect()
}
