//! Clasificación de tokens de horario en las tres formas conocidas.
//!
//! | forma           | ejemplo         |
//! |-----------------|-----------------|
//! | sala primero    | `W310(수7)`      |
//! | día primero     | `화E(P203)`      |
//! | día + lista     | `목 A,B(J202)`   |
//!
//! Las formas se prueban en ese orden y gana la primera. Un token que no encaja
//! en ninguna se descarta sin abortar el registro.

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    ClassroomFirst,
    DayFirst,
    DayList,
}

/// Códigos de periodo extraídos de un token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodCodes {
    /// Un único código, posiblemente compuesto ("7", "67"): se resuelve como bloque
    Span(String),
    /// Lista de periodos ("A,B" o "AB"): una sesión por código
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatch {
    pub shape: SlotShape,
    pub day_symbol: char,
    pub periods: PeriodCodes,
    pub classroom: String,
}

/// Resultado del matcher para un token (tras re-unir fragmentos de lista)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub token: String,
    pub slot: Option<SlotMatch>,
}

pub struct SlotMatcher {
    classroom_first: Regex,
    day_first: Regex,
    day_list: Regex,
    open_list_head: Regex,
    list_fragment: Regex,
}

impl SlotMatcher {
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("patrón de horario inválido");
        SlotMatcher {
            classroom_first: compile(r"^([\w.\-]+)\s*\(\s*([가-힣])\s*([A-Za-z0-9]+)\s*\)"),
            day_first: compile(r"^([가-힣])([A-Za-z0-9]+)\s*\(\s*([\w.\-]+)\s*\)"),
            day_list: compile(r"^([가-힣])\s+([A-Za-z0-9]+(?:\s*,\s*[A-Za-z0-9]+)*)\s*\(\s*([\w.\-]+)\s*\)"),
            open_list_head: compile(r"^[가-힣]\s+[A-Za-z0-9]+(?:\s*,\s*[A-Za-z0-9]+)*$"),
            list_fragment: compile(r"^[A-Za-z0-9]{1,2}(?:\s*\(\s*[\w.\-]+\s*\))?$"),
        }
    }

    /// Clasifica un token ya completo
    pub fn classify(&self, token: &str) -> Option<SlotMatch> {
        let token = token.trim();

        if let Some(caps) = self.classroom_first.captures(token) {
            return Some(SlotMatch {
                shape: SlotShape::ClassroomFirst,
                day_symbol: caps[2].chars().next()?,
                periods: PeriodCodes::Span(caps[3].to_uppercase()),
                classroom: caps[1].to_string(),
            });
        }

        if let Some(caps) = self.day_first.captures(token) {
            return Some(SlotMatch {
                shape: SlotShape::DayFirst,
                day_symbol: caps[1].chars().next()?,
                periods: PeriodCodes::Span(caps[2].to_uppercase()),
                classroom: caps[3].to_string(),
            });
        }

        if let Some(caps) = self.day_list.captures(token) {
            let codes = caps[2]
                .split(',')
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect();
            return Some(SlotMatch {
                shape: SlotShape::DayList,
                day_symbol: caps[1].chars().next()?,
                periods: PeriodCodes::List(codes),
                classroom: caps[3].to_string(),
            });
        }

        None
    }

    // "B(J202)" continúa la lista; "P1(월A)" es una sesión completa con sala corta
    fn is_list_fragment(&self, token: &str) -> bool {
        let token = token.trim();
        self.list_fragment.is_match(token) && !self.classroom_first.is_match(token)
    }

    /// Recorre los tokens del segmentador. Una cabecera de lista abierta
    /// (`"목 A"`) absorbe los fragmentos siguientes (`"B(J202)"`) hasta cerrarse.
    pub fn match_tokens(&self, tokens: &[String]) -> Vec<TokenMatch> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let mut candidate = tokens[i].trim().to_string();
            i += 1;
            while self.open_list_head.is_match(&candidate) && i < tokens.len() && self.is_list_fragment(&tokens[i]) {
                candidate = format!("{},{}", candidate, tokens[i].trim());
                i += 1;
            }
            let slot = self.classify(&candidate);
            out.push(TokenMatch { token: candidate, slot });
        }
        out
    }
}

impl Default for SlotMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classroom_first() {
        let m = SlotMatcher::new();
        let slot = m.classify("W310(수7)").unwrap();
        assert_eq!(slot.shape, SlotShape::ClassroomFirst);
        assert_eq!(slot.day_symbol, '수');
        assert_eq!(slot.periods, PeriodCodes::Span("7".into()));
        assert_eq!(slot.classroom, "W310");

        let spaced = m.classify("505-1 (목 67)").unwrap();
        assert_eq!(spaced.classroom, "505-1");
        assert_eq!(spaced.periods, PeriodCodes::Span("67".into()));
    }

    #[test]
    fn test_day_first() {
        let m = SlotMatcher::new();
        let slot = m.classify("화E(P203)").unwrap();
        assert_eq!(slot.shape, SlotShape::DayFirst);
        assert_eq!(slot.day_symbol, '화');
        assert_eq!(slot.periods, PeriodCodes::Span("E".into()));
        assert_eq!(slot.classroom, "P203");
    }

    #[test]
    fn test_day_list() {
        let m = SlotMatcher::new();
        let slot = m.classify("목 A,B(J202)").unwrap();
        assert_eq!(slot.shape, SlotShape::DayList);
        assert_eq!(slot.periods, PeriodCodes::List(vec!["A".into(), "B".into()]));
        assert_eq!(slot.classroom, "J202");
    }

    #[test]
    fn test_unknown_shapes_are_none() {
        let m = SlotMatcher::new();
        assert!(m.classify("월A").is_none());
        assert!(m.classify("(?)").is_none());
        assert!(m.classify("W310").is_none());
        assert!(m.classify("()").is_none());
    }

    #[test]
    fn test_match_tokens_merges_list_fragments() {
        let m = SlotMatcher::new();
        let out = m.match_tokens(&tokens(&["목 A", "B(J202)", "W310(금7)"]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].token, "목 A,B(J202)");
        assert_eq!(out[0].slot.as_ref().unwrap().periods, PeriodCodes::List(vec!["A".into(), "B".into()]));
        assert_eq!(out[1].slot.as_ref().unwrap().classroom, "W310");
    }

    #[test]
    fn test_match_tokens_does_not_swallow_full_slots() {
        let m = SlotMatcher::new();
        // la cabecera nunca se cierra: queda descartada, pero el token siguiente sobrevive
        let out = m.match_tokens(&tokens(&["목 A", "W310(금7)"]));
        assert_eq!(out.len(), 2);
        assert!(out[0].slot.is_none());
        assert!(out[1].slot.is_some());
    }

    #[test]
    fn test_short_classroom_slot_is_not_absorbed() {
        let m = SlotMatcher::new();
        let out = m.match_tokens(&tokens(&["목 A", "P1(월A)"]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].token, "목 A");
        let slot = out[1].slot.as_ref().unwrap();
        assert_eq!(slot.shape, SlotShape::ClassroomFirst);
        assert_eq!(slot.classroom, "P1");
        assert_eq!(slot.day_symbol, '월');
    }
}
