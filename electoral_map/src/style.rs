use crate::config::*;
use crate::winner::share;

/// The support of the focus party is amplified by this factor before being
/// used as an opacity.
pub const FOCUS_OPACITY_GAIN: f64 = 2.0;
pub const FOCUS_OPACITY_MIN: f64 = 0.1;
pub const FOCUS_OPACITY_MAX: f64 = 0.9;

impl VisualStyle {
    /// The style of neighborhoods without data.
    pub fn no_data() -> VisualStyle {
        VisualStyle {
            fill_color: NEUTRAL_COLOR.to_string(),
            fill_opacity: NO_DATA_FILL_OPACITY,
            stroke_color: STROKE_COLOR.to_string(),
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: STROKE_OPACITY,
        }
    }

    fn filled(fill_color: &str, fill_opacity: f64) -> VisualStyle {
        VisualStyle {
            fill_color: fill_color.to_string(),
            fill_opacity,
            ..VisualStyle::no_data()
        }
    }
}

/// The resting style of a feature.
///
/// Without a focus party, the feature takes the color of its winning party.
/// With a focus party, it takes the color of that party and an opacity that
/// grows with the share of that party in the neighborhood.
pub fn style_for(feature: &EnrichedFeature, focus_party: Option<&str>, parties: &PartyTable) -> VisualStyle {
    style_with_opacity(feature, focus_party, parties, DEFAULT_FILL_OPACITY)
}

/// Same as [`style_for`], with a custom opacity for the winning-party mode.
pub fn style_with_opacity(
    feature: &EnrichedFeature,
    focus_party: Option<&str>,
    parties: &PartyTable,
    opacity: f64,
) -> VisualStyle {
    let fv = match &feature.votes {
        Some(fv) => fv,
        None => return VisualStyle::no_data(),
    };
    match focus_party {
        Some(party) => {
            let s = share(fv.votes.votes_for(party), fv.total_votes);
            VisualStyle::filled(parties.color_for(party), focus_opacity(s))
        }
        None => VisualStyle::filled(parties.color_for(&fv.winning_party), opacity),
    }
}

/// Maps the share of the focus party to an opacity in [0.1, 0.9].
pub fn focus_opacity(share: f64) -> f64 {
    (share * FOCUS_OPACITY_GAIN).clamp(FOCUS_OPACITY_MIN, FOCUS_OPACITY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> PartyTable {
        PartyTable::new(&[
            Party {
                id: "anr".to_string(),
                name: "ANR".to_string(),
                color: "#E63946".to_string(),
            },
            Party {
                id: "plra".to_string(),
                name: "PLRA".to_string(),
                color: "#1D3557".to_string(),
            },
        ])
    }

    fn feature(votes: &[(&str, u64)], total_votes: u64, winning_party: &str) -> EnrichedFeature {
        EnrichedFeature {
            geometry: NeighborhoodGeometry {
                id: "1".to_string(),
                name: "Centro".to_string(),
                rings: vec![],
            },
            votes: Some(FeatureVotes {
                votes: votes.iter().map(|(p, v)| (*p, *v)).collect(),
                total_votes,
                winning_party: winning_party.to_string(),
                winning_share: 0.0,
            }),
        }
    }

    #[test]
    fn no_data_is_neutral() {
        let f = EnrichedFeature {
            votes: None,
            ..feature(&[], 0, "")
        };
        let s = style_for(&f, None, &parties());
        assert_eq!(s.fill_color, "#CCCCCC");
        assert_eq!(s.fill_opacity, 0.4);
        assert_eq!(s.stroke_color, "#666");
        assert_eq!(s.stroke_weight, 1);
        assert_eq!(style_for(&f, Some("anr"), &parties()), s);
    }

    #[test]
    fn winner_color() {
        let f = feature(&[("anr", 600), ("plra", 400)], 1000, "anr");
        let s = style_for(&f, None, &parties());
        assert_eq!(s.fill_color, "#E63946");
        assert_eq!(s.fill_opacity, 0.7);
        assert_eq!(s.stroke_color, "#666");
        assert_eq!(s.stroke_weight, 1);
    }

    #[test]
    fn unknown_or_missing_winner_is_neutral() {
        let f = feature(&[("otro", 10)], 10, "otro");
        assert_eq!(style_for(&f, None, &parties()).fill_color, "#CCCCCC");
        let f = feature(&[], 0, "");
        assert_eq!(style_for(&f, None, &parties()).fill_color, "#CCCCCC");
    }

    #[test]
    fn focus_party_intensity() {
        let f = feature(&[("anr", 300), ("plra", 700)], 1000, "plra");
        let s = style_for(&f, Some("anr"), &parties());
        assert_eq!(s.fill_color, "#E63946");
        assert!((s.fill_opacity - 0.6).abs() < 1e-12);
    }

    #[test]
    fn focus_opacity_is_clamped() {
        let f = feature(&[("anr", 0), ("plra", 1000)], 1000, "plra");
        assert_eq!(style_for(&f, Some("anr"), &parties()).fill_opacity, 0.1);
        assert_eq!(style_for(&f, Some("plra"), &parties()).fill_opacity, 0.9);
        // No votes at all.
        let f = feature(&[("anr", 0)], 0, "");
        assert_eq!(style_for(&f, Some("anr"), &parties()).fill_opacity, 0.1);
    }

    #[test]
    fn unknown_focus_party() {
        let f = feature(&[("anr", 600)], 1000, "anr");
        let s = style_for(&f, Some("otro"), &parties());
        assert_eq!(s.fill_color, "#CCCCCC");
        assert_eq!(s.fill_opacity, 0.1);
    }

    #[test]
    fn custom_default_opacity() {
        let f = feature(&[("plra", 600)], 1000, "plra");
        let s = style_with_opacity(&f, None, &parties(), 0.5);
        assert_eq!(s.fill_color, "#1D3557");
        assert_eq!(s.fill_opacity, 0.5);
    }
}
