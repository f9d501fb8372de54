//! Lore line rendering.

use std::sync::Arc;

use uuid::Uuid;

use super::{PlaceholderEngine, color};
use crate::config::Settings;

/// Cells in the progress bar.
const BAR_CELLS: i32 = 10;

/// Inputs for one render pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub remaining: i32,
    pub max: i32,
    pub infinite: bool,
    pub owner: Option<Uuid>,

    /// Resolved display name of an online owner.
    pub owner_name: Option<&'a str>,

    /// Prefix for the bound-owner line, supplied by the binding collaborator.
    pub bind_prefix: &'a str,
}

/// Renders the ordered lore line list from counter state.
pub struct LoreRenderer {
    settings: Arc<Settings>,
    placeholders: Option<Arc<dyn PlaceholderEngine>>,
}

impl LoreRenderer {
    pub fn new(settings: Arc<Settings>, placeholders: Option<Arc<dyn PlaceholderEngine>>) -> Self {
        Self {
            settings,
            placeholders,
        }
    }

    /// Produce the full line list for `ctx`.
    ///
    /// Toggled-off sections are omitted from the list; nothing is ever
    /// renumbered around them.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let d = &self.settings.display;
        let mut lines = Vec::new();

        // The marker must stay line 0 verbatim; is_counted() looks for it.
        lines.push(d.marker_line.clone());

        if d.decorative_lore {
            for raw in &d.decorative_lines {
                let mut line = color::colorize(raw);
                if d.apply_placeholders {
                    if let Some(engine) = &self.placeholders {
                        line = engine.apply(ctx, &line);
                    }
                }
                lines.push(line);
            }
        }

        if d.show_bound_owner {
            if let Some(owner) = ctx.owner {
                let line = match ctx.owner_name {
                    Some(name) => format!("{}{}", ctx.bind_prefix, name),
                    None => format!("{}{}", ctx.bind_prefix, owner),
                };
                lines.push(line);
            }
        }

        if d.show_usage_count {
            let line = if ctx.infinite {
                format!(
                    "{}{} {}∞{}/{}∞",
                    color::GRAY,
                    d.usage_prefix,
                    color::AQUA,
                    color::GRAY,
                    color::GRAY
                )
            } else {
                format!(
                    "{}{} {}{}{}/{}{}",
                    color::GRAY,
                    d.usage_prefix,
                    color::AQUA,
                    ctx.remaining,
                    color::GRAY,
                    color::GRAY,
                    ctx.max
                )
            };
            lines.push(line);
        }

        if d.show_progress_bar && !ctx.infinite {
            lines.push(progress_bar(ctx.remaining, ctx.max));
        }

        lines
    }
}

/// Ten fixed-width cells; filled count by nearest-integer rounding.
fn progress_bar(remaining: i32, max: i32) -> String {
    let ratio = remaining as f64 / max as f64;
    let filled = (ratio * BAR_CELLS as f64).round() as i32;

    let mut bar = String::new();
    bar.push_str(color::GRAY);
    bar.push('[');
    for i in 0..BAR_CELLS {
        if i < filled {
            bar.push_str(color::GREEN);
        } else {
            bar.push_str(color::GRAY);
        }
        bar.push('■');
    }
    bar.push_str(color::GRAY);
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::BasicPlaceholders;

    fn renderer(settings: Settings) -> LoreRenderer {
        LoreRenderer::new(Arc::new(settings), None)
    }

    fn ctx(remaining: i32, max: i32, infinite: bool) -> RenderContext<'static> {
        RenderContext {
            remaining,
            max,
            infinite,
            owner: None,
            owner_name: None,
            bind_prefix: "§7Owner: ",
        }
    }

    fn filled_cells(bar: &str) -> usize {
        bar.matches(color::GREEN).count()
    }

    #[test]
    fn marker_is_always_line_zero() {
        let settings = Settings::default();
        let marker = settings.display.marker_line.clone();
        let lines = renderer(settings).render(&ctx(5, 10, false));
        assert_eq!(lines[0], marker);
    }

    #[test]
    fn progress_bar_edges() {
        let r = renderer(Settings::default());

        let lines = r.render(&ctx(0, 10, false));
        assert_eq!(filled_cells(lines.last().unwrap()), 0);

        let lines = r.render(&ctx(10, 10, false));
        assert_eq!(filled_cells(lines.last().unwrap()), 10);

        let lines = r.render(&ctx(1, 1, false));
        assert_eq!(filled_cells(lines.last().unwrap()), 10);

        // Nearest-integer rounding, not floor: 9.5/10 rounds up.
        let lines = r.render(&ctx(19, 20, false));
        assert_eq!(filled_cells(lines.last().unwrap()), 10);

        let lines = r.render(&ctx(1, 20, false));
        assert_eq!(filled_cells(lines.last().unwrap()), 1);
    }

    #[test]
    fn infinite_suppresses_bar_and_renders_infinity() {
        let lines = renderer(Settings::default()).render(&ctx(123, 456, true));
        let usage = lines.last().unwrap();
        assert!(usage.contains('∞'), "usage line renders infinity: {usage}");
        assert!(!usage.contains('['), "no bar after the usage line");
        assert!(lines.iter().all(|l| !l.contains('■')));
    }

    #[test]
    fn usage_line_shows_remaining_over_max() {
        let lines = renderer(Settings::default()).render(&ctx(3, 10, false));
        let usage = &lines[lines.len() - 2];
        assert!(color::strip(usage).contains("3/10"), "got: {usage}");
    }

    #[test]
    fn toggles_omit_sections_without_renumbering() {
        let mut settings = Settings::default();
        settings.display.show_usage_count = false;
        settings.display.show_progress_bar = false;
        settings.display.show_bound_owner = false;
        settings.display.decorative_lore = false;

        let lines = renderer(settings).render(&ctx(5, 10, false));
        assert_eq!(lines.len(), 1, "only the marker remains");
    }

    #[test]
    fn owner_line_prefers_resolved_name() {
        let settings = Settings::default();
        let owner = Uuid::from_u128(31);
        let r = renderer(settings);

        let mut with_name = ctx(5, 10, false);
        with_name.owner = Some(owner);
        with_name.owner_name = Some("Steve");
        let lines = r.render(&with_name);
        assert!(lines.iter().any(|l| l.ends_with("Steve")));

        let mut without_name = ctx(5, 10, false);
        without_name.owner = Some(owner);
        let lines = r.render(&without_name);
        assert!(lines.iter().any(|l| l.contains(&owner.to_string())));
    }

    #[test]
    fn decorative_lines_get_colors_and_placeholders() {
        let mut settings = Settings::default();
        settings.display.decorative_lines = vec!["&7Charged for {owner}: {remaining}".to_string()];
        let r = LoreRenderer::new(Arc::new(settings), Some(Arc::new(BasicPlaceholders)));

        let mut c = ctx(7, 10, false);
        c.owner_name = Some("Alex");
        let lines = r.render(&c);
        assert_eq!(lines[1], "§7Charged for Alex: 7");
    }
}
