//! Templated idea generation.
//!
//! Stands in for a real AI backend: ten fixed templates, each with one topic
//! slot and a category tag. A generation batch is a uniform random sample of
//! [`GENERATION_BATCH_SIZE`] templates with the topic substituted verbatim.
//!
//! The permutation source is injectable through [`TemplateShuffler`] so
//! callers can reproduce a batch exactly.

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Number of ideas produced per generation call.
pub const GENERATION_BATCH_SIZE: usize = 5;

/// Creator recorded on generated ideas.
pub const AI_ASSISTANT: &str = "AI Assistant";

/// Placeholder replaced by the session topic.
const TOPIC_SLOT: &str = "{topic}";

/// One idea template: a sentence with a single `{topic}` slot, plus its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeaTemplate {
    pub pattern: &'static str,
    pub category: &'static str,
}

impl IdeaTemplate {
    /// Substitutes the topic into the template's slot.
    pub fn render(&self, topic: &str) -> String {
        self.pattern.replacen(TOPIC_SLOT, topic, 1)
    }
}

/// The fixed template set.
pub const IDEA_TEMPLATES: [IdeaTemplate; 10] = [
    IdeaTemplate {
        pattern: "Innovative mobile app solution for {topic} using cutting-edge technology",
        category: "Technology",
    },
    IdeaTemplate {
        pattern: "User-centered design approach to improve {topic} experience",
        category: "User Experience",
    },
    IdeaTemplate {
        pattern: "Community-driven platform for {topic} collaboration and sharing",
        category: "Community",
    },
    IdeaTemplate {
        pattern: "Data analytics integration for {topic} insights and optimization",
        category: "Analytics",
    },
    IdeaTemplate {
        pattern: "Gamification elements to enhance {topic} user engagement",
        category: "Engagement",
    },
    IdeaTemplate {
        pattern: "AI-powered automation for {topic} workflow optimization",
        category: "Automation",
    },
    IdeaTemplate {
        pattern: "Social media integration to amplify {topic} reach and impact",
        category: "Marketing",
    },
    IdeaTemplate {
        pattern: "Subscription-based model for {topic} monetization strategy",
        category: "Business Model",
    },
    IdeaTemplate {
        pattern: "Cross-platform solution to expand {topic} accessibility",
        category: "Platform",
    },
    IdeaTemplate {
        pattern: "Real-time collaboration features for {topic} team productivity",
        category: "Collaboration",
    },
];

/// Categories of [`IDEA_TEMPLATES`], in template order.
pub fn template_categories() -> impl Iterator<Item = &'static str> {
    IDEA_TEMPLATES.iter().map(|t| t.category)
}

/// An idea produced by the generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdea {
    pub content: String,
    pub category: String,
}

/// Source of template permutations.
pub trait TemplateShuffler: Send + Sync {
    /// Permutes `templates` in place.
    fn shuffle(&self, templates: &mut [IdeaTemplate]);
}

/// Uniform random permutations backed by a [`StdRng`].
pub struct RandomShuffler {
    rng: Mutex<StdRng>,
}

impl RandomShuffler {
    /// Creates a shuffler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a shuffler whose permutation sequence is fixed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateShuffler for RandomShuffler {
    fn shuffle(&self, templates: &mut [IdeaTemplate]) {
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        templates.shuffle(&mut *rng);
    }
}

/// Maps a topic to a generation batch.
#[derive(Clone)]
pub struct IdeaGenerator {
    shuffler: Arc<dyn TemplateShuffler>,
}

impl IdeaGenerator {
    /// Creates a generator drawing permutations from `shuffler`.
    pub fn new(shuffler: Arc<dyn TemplateShuffler>) -> Self {
        Self { shuffler }
    }

    /// Creates a generator with an entropy-seeded [`RandomShuffler`].
    pub fn random() -> Self {
        Self::new(Arc::new(RandomShuffler::from_entropy()))
    }

    /// Creates a generator with a reproducible [`RandomShuffler`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(RandomShuffler::seeded(seed)))
    }

    /// Produces [`GENERATION_BATCH_SIZE`] ideas for `topic`, in post-shuffle order.
    pub fn generate(&self, topic: &str) -> Vec<GeneratedIdea> {
        let mut templates = IDEA_TEMPLATES;
        self.shuffler.shuffle(&mut templates);

        templates
            .iter()
            .take(GENERATION_BATCH_SIZE)
            .map(|template| GeneratedIdea {
                content: template.render(topic),
                category: template.category.to_string(),
            })
            .collect()
    }
}

impl Default for IdeaGenerator {
    fn default() -> Self {
        Self::random()
    }
}
