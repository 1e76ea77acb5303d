//! Encouragement shown to the kitchen team each time a plan is requested.

use rand::seq::SliceRandom;
use rand::Rng;

pub const AFFIRMATIONS: [&str; 13] = [
    "You're going to have a great event today!",
    "September is coming. Rest is near!",
    "You're doing great work, keep pushing.",
    "Big events start with small prep wins.",
    "Your mise en place is your superpower.",
    "Stay sharp. Stay strong. Stay caffeinated ☕️.",
    "Organization is the secret ingredient.",
    "The guests won't know, but your team will. Great work!",
    "Good prep saves lives (and lunch rushes).",
    "Every tray you prep is a step closer to success.",
    "Take pride in every tray, every plate, every garnish.",
    "Today's prep is tomorrow's peace.",
    "Keep those knives sharp and your spirits sharper.",
];

/// Pick one affirmation uniformly at random
pub fn random_affirmation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    AFFIRMATIONS.choose(rng).copied().unwrap_or(AFFIRMATIONS[0])
}
