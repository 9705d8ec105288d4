//! Módulo `schedule`: parser de la cadena "강의실/강의시간".
//!
//! Submódulos:
//! - `periods`: tablas de periodos y resolución de códigos a horas
//! - `segmenter`: corte de la cadena en tokens
//! - `matcher`: reconocimiento de las tres formas de token
//! - `expander`: día/periodos -> sesiones concretas
//! - `building`: código de sala -> edificio

pub mod building;
pub mod expander;
pub mod matcher;
pub mod periods;
pub mod segmenter;

pub use building::BuildingResolver;
pub use expander::SkipReason;
pub use matcher::{PeriodCodes, SlotMatch, SlotMatcher, SlotShape};
pub use periods::{PeriodDialect, PeriodSpec, PeriodTable};

use crate::models::ResolvedSlot;
use tracing::debug;

/// Resultado por token: o produce sesiones, o se salta con un motivo.
/// Un token saltado nunca aborta el registro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    Resolved { token: String, slots: Vec<ResolvedSlot> },
    Skipped { token: String, reason: SkipReason },
}

impl TokenOutcome {
    pub fn slots(&self) -> &[ResolvedSlot] {
        match self {
            TokenOutcome::Resolved { slots, .. } => slots,
            TokenOutcome::Skipped { .. } => &[],
        }
    }
}

/// Parser completo de horarios. Las tablas y patrones se construyen una vez y
/// se reutilizan para todos los registros de la ejecución.
pub struct ScheduleParser {
    periods: PeriodTable,
    buildings: BuildingResolver,
    matcher: SlotMatcher,
}

impl ScheduleParser {
    pub fn new(dialect: PeriodDialect) -> Self {
        ScheduleParser {
            periods: PeriodTable::new(dialect),
            buildings: BuildingResolver::new(),
            matcher: SlotMatcher::new(),
        }
    }

    pub fn dialect(&self) -> PeriodDialect {
        self.periods.dialect()
    }

    pub fn periods(&self) -> &PeriodTable {
        &self.periods
    }

    pub fn buildings(&self) -> &BuildingResolver {
        &self.buildings
    }

    /// Resultado detallado por token (útil para diagnóstico)
    pub fn parse_tokens(&self, raw: &str) -> Vec<TokenOutcome> {
        let tokens = segmenter::segment(raw);
        self.matcher
            .match_tokens(&tokens)
            .into_iter()
            .map(|m| {
                let result = match &m.slot {
                    Some(slot) => expander::expand(slot, &self.periods, &self.buildings),
                    None => Err(SkipReason::NoShape),
                };
                match result {
                    Ok(slots) => TokenOutcome::Resolved { token: m.token, slots },
                    Err(reason) => {
                        debug!("token de horario descartado: '{}' ({:?})", m.token, reason);
                        TokenOutcome::Skipped { token: m.token, reason }
                    }
                }
            })
            .collect()
    }

    /// Todas las sesiones de una cadena de horario, en orden de aparición
    pub fn parse(&self, raw: &str) -> Vec<ResolvedSlot> {
        self.parse_tokens(raw)
            .into_iter()
            .flat_map(|outcome| match outcome {
                TokenOutcome::Resolved { slots, .. } => slots,
                TokenOutcome::Skipped { .. } => Vec::new(),
            })
            .collect()
    }
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self::new(PeriodDialect::default())
    }
}
