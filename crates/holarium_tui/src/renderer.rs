//! Entity grid widget.
//!
//! Renders one row per entity, capped at the display's row budget:
//! `E:<id> <A|D> <domain> I:<interactions> C:<confidence> F:<fitness>`.
//! Row text is produced by [`format_row`] so the layout is testable without
//! a terminal.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};

use holarium_core::snapshot::{EntitySnapshot, WorldSnapshot};

/// Formats one entity row.
///
/// The id column is a single hex digit (low nibble of the id), interactions
/// wrap modulo 100, confidence is scaled to one digit and clamped, and the
/// fitness digit is `(fitness / 10) % 10`. Domain labels truncate to six
/// characters, padded on the right.
pub fn format_row(entity: &EntitySnapshot) -> String {
    let domain: String = entity.domain.chars().take(6).collect();
    let confidence_digit = ((entity.confidence * 10.0) as i32).clamp(0, 9);
    let fitness_digit = (entity.fitness_score / 10) % 10;

    format!(
        "E:{:X} {} {:<6} I:{:02} C:{} F:{}",
        entity.id & 0xF,
        if entity.is_active { 'A' } else { 'D' },
        domain,
        entity.interaction_count % 100,
        confidence_digit,
        fitness_digit
    )
}

pub struct EntityGrid<'a> {
    snapshot: &'a WorldSnapshot,
    max_rows: usize,
}

impl<'a> EntityGrid<'a> {
    pub fn new(snapshot: &'a WorldSnapshot, max_rows: usize) -> Self {
        Self { snapshot, max_rows }
    }

    fn row_style(entity: &EntitySnapshot) -> Style {
        if entity.is_active {
            Style::default().fg(Color::Rgb(100, 255, 100))
        } else {
            Style::default().fg(Color::Rgb(120, 120, 120))
        }
    }
}

impl Widget for EntityGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " holarium | tick {} | cycle {} | entities {} | records {} ",
            self.snapshot.tick,
            self.snapshot.cycle,
            self.snapshot.entities.len(),
            self.snapshot.record_count
        );
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.max_rows.min(inner.height as usize);
        for (i, entity) in self.snapshot.entities.iter().take(rows).enumerate() {
            buf.set_string(
                inner.x,
                inner.y + i as u16,
                format_row(entity),
                Self::row_style(entity),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_entity() -> EntitySnapshot {
        EntitySnapshot {
            id: 0,
            is_active: true,
            domain: "generic".to_string(),
            interaction_count: 0,
            confidence: 0.5,
            fitness_score: 0,
            task_alignment: 0.0,
            age: 0,
            is_mutant: false,
        }
    }

    #[test]
    fn test_row_layout_for_seed_entity() {
        let entity = snapshot_entity();
        assert_eq!(format_row(&entity), "E:0 A generi I:00 C:5 F:0");
    }

    #[test]
    fn test_row_marks_dormant_entities() {
        let entity = EntitySnapshot {
            is_active: false,
            domain: "sleeper".to_string(),
            ..snapshot_entity()
        };
        assert_eq!(format_row(&entity), "E:0 D sleepe I:00 C:5 F:0");
    }

    #[test]
    fn test_interactions_wrap_modulo_100() {
        let entity = EntitySnapshot {
            interaction_count: 123,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).contains("I:23"));
    }

    #[test]
    fn test_fitness_digit_divides_then_wraps() {
        let entity = EntitySnapshot {
            fitness_score: 57,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).contains("F:5"));

        let entity = EntitySnapshot {
            fitness_score: 230,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).contains("F:3"));
    }

    #[test]
    fn test_confidence_digit_clamps_at_nine() {
        let entity = EntitySnapshot {
            confidence: 2.5,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).contains("C:9"));
    }

    #[test]
    fn test_id_renders_as_single_hex_digit() {
        let entity = EntitySnapshot {
            id: 11,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).starts_with("E:B "));

        let entity = EntitySnapshot {
            id: 0x1A,
            ..snapshot_entity()
        };
        assert!(format_row(&entity).starts_with("E:A "));
    }
}
