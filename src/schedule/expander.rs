// Expansión de un token reconocido a sesiones concretas (día, inicio, fin).

use crate::models::{ClockTime, Day, ResolvedSlot};
use crate::schedule::building::BuildingResolver;
use crate::schedule::matcher::{PeriodCodes, SlotMatch};
use crate::schedule::periods::PeriodTable;

/// Motivo por el que un token (o parte de él) no produjo sesión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// El token no encaja en ninguna forma conocida
    NoShape,
    /// Símbolo de día fuera de `월`..`토`
    UnknownDay(char),
    /// Ningún código de periodo del token existe en la tabla activa
    UnknownPeriod(String),
}

/// Expande un `SlotMatch` con la tabla activa.
///
/// - `Span`: el código se resuelve como un bloque contiguo (una sola sesión).
/// - `List`: cada código se resuelve por separado (una sesión por código);
///   los códigos desconocidos se saltan sin descartar a sus hermanos.
pub fn expand(
    slot: &SlotMatch,
    periods: &PeriodTable,
    buildings: &BuildingResolver,
) -> Result<Vec<ResolvedSlot>, SkipReason> {
    let day = Day::from_symbol(slot.day_symbol).ok_or(SkipReason::UnknownDay(slot.day_symbol))?;
    let (building_code, building_name) = buildings.resolve(&slot.classroom);

    let make = |(start, end): (ClockTime, ClockTime)| ResolvedSlot {
        day,
        start,
        end,
        classroom: slot.classroom.clone(),
        building_code: building_code.clone(),
        building_name: building_name.clone(),
    };

    let resolved: Vec<ResolvedSlot> = match &slot.periods {
        PeriodCodes::Span(code) => periods.resolve_span(code).map(make).into_iter().collect(),
        PeriodCodes::List(codes) => list_atoms(codes, periods)
            .iter()
            .filter_map(|code| periods.resolve(code))
            .map(make)
            .collect(),
    };

    if resolved.is_empty() {
        let codes = match &slot.periods {
            PeriodCodes::Span(code) => code.clone(),
            PeriodCodes::List(codes) => codes.join(","),
        };
        return Err(SkipReason::UnknownPeriod(codes));
    }
    Ok(resolved)
}

// Un elemento de lista que ya es código de la tabla ("10") se usa tal cual;
// si no, cada carácter es un periodo ("AB" -> A, B).
fn list_atoms(codes: &[String], periods: &PeriodTable) -> Vec<String> {
    let mut atoms = Vec::new();
    for code in codes {
        if periods.contains(code) {
            atoms.push(code.clone());
        } else {
            atoms.extend(code.chars().map(|c| c.to_string()));
        }
    }
    atoms
}
