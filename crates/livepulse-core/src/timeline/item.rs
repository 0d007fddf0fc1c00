use serde::{Deserialize, Serialize};

/// One entry of the AI-history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: String,
    pub title: String,
    pub description: String,
    /// The "what this means for you" takeaway shown under the entry.
    pub takeaway: String,
}

impl Milestone {
    fn new(year: &str, title: &str, description: &str, takeaway: &str) -> Self {
        Self {
            year: year.into(),
            title: title.into(),
            description: description.into(),
            takeaway: takeaway.into(),
        }
    }
}

/// The canonical eight milestones, in display order.
pub fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone::new(
            "1956",
            "AI is Born",
            "The term 'Artificial Intelligence' is coined at Dartmouth",
            "You're living in the era AI was always meant to reach - mass human adoption.",
        ),
        Milestone::new(
            "1997",
            "Deep Blue Beats Chess Master",
            "AI defeats world chess champion Garry Kasparov",
            "AI excels at strategic thinking - learn to collaborate, not compete with it.",
        ),
        Milestone::new(
            "2011",
            "Watson Wins Jeopardy!",
            "IBM's Watson defeats human champions at knowledge trivia",
            "AI processes information instantly - your value is in interpretation and wisdom.",
        ),
        Milestone::new(
            "2016",
            "AlphaGo's Breakthrough",
            "AI masters the ancient game of Go through creative intuition",
            "AI can be creative and intuitive - embrace hybrid human-AI collaboration.",
        ),
        Milestone::new(
            "2020",
            "GPT-3 Revolution",
            "AI begins writing, coding, and creating at human level",
            "AI is your creative partner - focus on prompting, editing, and strategic direction.",
        ),
        Milestone::new(
            "2022",
            "ChatGPT Goes Viral",
            "1 million users in 5 days - AI enters mainstream consciousness",
            "AI literacy is now as essential as digital literacy was in the 1990s.",
        ),
        Milestone::new(
            "2024",
            "AI Agents Emerge",
            "AI systems begin completing complex multi-step business tasks",
            "The future belongs to those who can orchestrate AI agents effectively.",
        ),
        Milestone::new(
            "2025",
            "Your AI Literacy Journey",
            "You decide how AI shapes your personal and professional future",
            "Right now, you have the power to shape how AI impacts your life and career.",
        ),
    ]
}
