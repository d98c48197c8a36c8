//! Live "players remaining" counter on the americano tournament form.

use tracing::debug;

use crate::error::Result;
use crate::view::Dom;

/// Element ids used by the counter. Django renders form fields as
/// `id_<name>`.
#[derive(Debug, Clone)]
pub struct RemainingIds {
    pub num_players: String,
    pub players: String,
    pub new_players: String,
    pub output: String,
}

impl Default for RemainingIds {
    fn default() -> Self {
        Self {
            num_players: "id_num_players".to_string(),
            players: "id_players".to_string(),
            new_players: "id_new_players".to_string(),
            output: "players-remaining".to_string(),
        }
    }
}

/// How far the selection is from the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// Target is not a positive number
    Unknown,
    Open(u128),
    Complete,
    Over(u128),
}

impl Remaining {
    pub fn compute(target: &str, selected: usize) -> Self {
        let target = match parse_int(target) {
            Some(t) if t > 0 => t,
            _ => return Remaining::Unknown,
        };

        let remaining = target - selected as i128;
        match remaining {
            r if r > 0 => Remaining::Open(r.unsigned_abs()),
            0 => Remaining::Complete,
            r => Remaining::Over(r.unsigned_abs()),
        }
    }

    pub fn text(self) -> String {
        match self {
            Remaining::Unknown => "Jugadores restantes: —".to_string(),
            Remaining::Open(n) => format!("Jugadores restantes: {}", n),
            Remaining::Complete => "Jugadores restantes: 0 (completo!!)".to_string(),
            Remaining::Over(n) => format!("Has seleccionado {} jugador(es) de más.", n),
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Remaining::Unknown | Remaining::Open(_) => "small text-muted",
            Remaining::Complete => "small text-success fw-bold",
            Remaining::Over(_) => "small text-danger",
        }
    }
}

/// Leading integer of a string, like JavaScript's `parseInt(s, 10)`.
/// Saturates instead of failing on absurdly long digit runs.
fn parse_int(s: &str) -> Option<i128> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n = digits[..end]
        .bytes()
        .fold(0i128, |n, d| n.saturating_mul(10).saturating_add(i128::from(d - b'0')));
    Some(n * sign)
}

/// One new player per non-blank line
pub fn count_new_players(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Binds the counter to the tournament form
pub struct PlayersRemaining<D> {
    dom: D,
    ids: RemainingIds,
}

impl<D: Dom> PlayersRemaining<D> {
    /// `None` when the page has no counter element
    pub fn attach(dom: D, ids: RemainingIds) -> Option<Self> {
        if !dom.exists(&ids.output) {
            return None;
        }
        Some(Self { dom, ids })
    }

    pub fn ids(&self) -> &RemainingIds {
        &self.ids
    }

    /// Whether all three inputs are present
    pub fn has_inputs(&self) -> bool {
        [&self.ids.num_players, &self.ids.players, &self.ids.new_players]
            .iter()
            .all(|id| self.dom.exists(id))
    }

    /// Recompute and render the counter
    pub fn update(&self) -> Result<Remaining> {
        let remaining = if self.has_inputs() {
            let target = self.dom.value(&self.ids.num_players).unwrap_or_default();
            let selected = self.dom.selected_count(&self.ids.players)
                + count_new_players(&self.dom.value(&self.ids.new_players).unwrap_or_default());
            Remaining::compute(&target, selected)
        } else {
            Remaining::Unknown
        };

        debug!(?remaining, "Players remaining updated");
        self.dom.set_text(&self.ids.output, &remaining.text())?;
        self.dom.set_class_name(&self.ids.output, remaining.class_name())?;
        Ok(remaining)
    }
}
