//! Permanent-hazard highlight resolution.
//!
//! Hazards have a binary outcome: highlighted when "edited as targeted",
//! transparent otherwise. The targeting predicate combines the editor
//! filter and the recency filter; each is independently resolvable to
//! absent or a boolean.

use chrono::{DateTime, Utc};

use cartomark_core::Color;
use cartomark_core::entity::Hazard;

use crate::context::RuleContext;
use crate::settings::EditorSelector;

/// Fill color applied to hazards that match the targeting predicate.
pub const HAZARD_HIGHLIGHT: Color = Color::LIME;

/// The targeting predicate, computed once per pass.
#[derive(Debug, Clone)]
pub struct HazardPredicate<'a> {
    editor: Option<&'a EditorSelector>,
    recent_days: Option<u32>,
    current_user: Option<&'a str>,
    now: DateTime<Utc>,
}

impl<'a> HazardPredicate<'a> {
    pub fn new(ctx: &'a RuleContext) -> Self {
        Self {
            editor: ctx.editor.as_ref(),
            recent_days: ctx.recent_days,
            current_user: ctx.current_user.as_deref(),
            now: ctx.now,
        }
    }

    /// Whether a hazard counts as edited-as-targeted.
    ///
    /// With both filters active a hazard must satisfy both; with one
    /// active, satisfying it is enough; with neither, nothing matches.
    pub fn matches(&self, hazard: &Hazard) -> bool {
        let editor_match = self.editor.map(|selector| {
            selector.matches(
                hazard.modification.updated_by.as_deref(),
                self.current_user,
            )
        });
        let recent_match = self.recent_days.map(|window| {
            hazard
                .modification
                .age_days(self.now)
                .is_some_and(|age| age <= f64::from(window))
        });

        match (editor_match, recent_match) {
            (Some(editor), Some(recent)) => editor && recent,
            (Some(editor), None) => editor,
            (None, Some(recent)) => recent,
            (None, None) => false,
        }
    }
}

/// Resolve the highlight fill for one hazard.
pub fn resolve(hazard: &Hazard, predicate: &HazardPredicate<'_>) -> Color {
    if predicate.matches(hazard) {
        HAZARD_HIGHLIGHT
    } else {
        Color::TRANSPARENT
    }
}
