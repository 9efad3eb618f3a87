//! Preset habit bundles a user can adopt in one step.

use crate::draft::HabitDraft;
use crate::error::{CoreError, Result};
use crate::weekday::DayOfWeek;

/// A named bundle of habit drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Stable identifier
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Short description
    pub description: &'static str,
    /// Habits created when the template is used
    pub habits: Vec<HabitDraft>,
}

struct Preset {
    emoji: &'static str,
    title: &'static str,
    description: &'static str,
    time: &'static str,
    days: &'static [DayOfWeek],
    category: &'static str,
    benefit: &'static str,
    frequency: &'static str,
}

impl Preset {
    fn draft(&self) -> HabitDraft {
        HabitDraft {
            title: self.title.to_string(),
            emoji: self.emoji.to_string(),
            description: self.description.to_string(),
            time_slots: vec![self.time.to_string()],
            selected_days: self.days.to_vec(),
            goal_days: None,
            category: self.category.to_string(),
            benefit: self.benefit.to_string(),
            frequency: self.frequency.to_string(),
        }
    }
}

const MONDAY: &[DayOfWeek] = &[DayOfWeek::Monday];
const SUNDAY: &[DayOfWeek] = &[DayOfWeek::Sunday];
const WALK_DAYS: &[DayOfWeek] = &[
    DayOfWeek::Monday,
    DayOfWeek::Wednesday,
    DayOfWeek::Friday,
    DayOfWeek::Sunday,
];

const WEEKLY_PLANNING: &[Preset] = &[
    Preset {
        emoji: "📋",
        title: "Weekly Priorities Review",
        description: "Gather and organize weekly priorities",
        time: "09:00",
        days: MONDAY,
        category: "planning",
        benefit: "Better organization and focus",
        frequency: "weekly",
    },
    Preset {
        emoji: "🎯",
        title: "Set Three Main Goals",
        description: "Define three key objectives for the week",
        time: "09:30",
        days: MONDAY,
        category: "planning",
        benefit: "Clear direction and purpose",
        frequency: "weekly",
    },
    Preset {
        emoji: "⏱️",
        title: "Time Allocation Review",
        description: "Allocate time for each objective",
        time: "10:00",
        days: MONDAY,
        category: "planning",
        benefit: "Effective time management",
        frequency: "weekly",
    },
];

const PERSONAL_DEVELOPMENT: &[Preset] = &[
    Preset {
        emoji: "📚",
        title: "Read 20 Pages",
        description: "Read personal development book",
        time: "18:00",
        days: &DayOfWeek::WEEKDAYS,
        category: "learning",
        benefit: "Knowledge and growth",
        frequency: "daily",
    },
    Preset {
        emoji: "🎥",
        title: "Educational Content",
        description: "Watch educational video (30 mins)",
        time: "19:00",
        days: &DayOfWeek::WEEKDAYS,
        category: "learning",
        benefit: "New perspectives and skills",
        frequency: "daily",
    },
];

const WELLNESS: &[Preset] = &[
    Preset {
        emoji: "🧘",
        title: "Meditation",
        description: "15-minute meditation session",
        time: "07:00",
        days: &DayOfWeek::ALL,
        category: "wellness",
        benefit: "Mental clarity and peace",
        frequency: "daily",
    },
    Preset {
        emoji: "🌳",
        title: "Nature Walk",
        description: "One hour walk in nature",
        time: "17:00",
        days: WALK_DAYS,
        category: "wellness",
        benefit: "Physical and mental refresh",
        frequency: "weekly",
    },
    Preset {
        emoji: "🛁",
        title: "Relaxation Time",
        description: "Relaxing bath with calming music",
        time: "20:00",
        days: SUNDAY,
        category: "wellness",
        benefit: "Stress relief and relaxation",
        frequency: "weekly",
    },
];

/// All preset templates.
pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "weekly-planning",
            title: "Weekly Planning & Goals",
            description: "Structure your week with clear objectives and review sessions",
            habits: WEEKLY_PLANNING.iter().map(Preset::draft).collect(),
        },
        Template {
            id: "personal-development",
            title: "Daily Personal Growth",
            description: "Invest in your personal development every day",
            habits: PERSONAL_DEVELOPMENT.iter().map(Preset::draft).collect(),
        },
        Template {
            id: "wellness-relaxation",
            title: "Wellness & Relaxation",
            description: "Take care of your body and mind",
            habits: WELLNESS.iter().map(Preset::draft).collect(),
        },
    ]
}

/// Look up a template by id.
pub fn template(id: &str) -> Result<Template> {
    templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CoreError::UnknownTemplate(id.to_string()))
}
