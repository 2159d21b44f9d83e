//! Rank levels.

use precinct_entity::officer::Rank;

/// Level of a rank label. Unrecognised labels are level 0.
pub fn rank_level(rank: &str) -> u8 {
    rank.parse::<Rank>().map(|r| r.level()).unwrap_or(0)
}

/// Whether an officer holding `rank` satisfies a `required` rank check.
///
/// Level 0 (an unrecognised rank) satisfies nothing.
pub fn has_role(rank: &str, required: Rank) -> bool {
    let level = rank_level(rank);
    level > 0 && level >= required.level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rank_has_no_role() {
        assert_eq!(rank_level("Commissioner"), 0);
        for required in Rank::ALL {
            assert!(!has_role("Commissioner", required));
            assert!(!has_role("", required));
        }
    }

    #[test]
    fn test_has_role_is_monotonic() {
        // If a rank passes a check, every more senior rank passes it too.
        for (i, holder) in Rank::ALL.iter().enumerate() {
            for required in Rank::ALL {
                if has_role(holder.as_str(), required) {
                    for senior in &Rank::ALL[..i] {
                        assert!(
                            has_role(senior.as_str(), required),
                            "{senior} should satisfy {required} because {holder} does"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_hierarchy() {
        assert!(has_role("ADMIN", Rank::ChiefInspector));
        assert!(has_role("Inspector", Rank::Inspector));
        assert!(!has_role("Sergeant", Rank::Inspector));
        assert!(has_role("Cadet", Rank::Cadet));
        assert!(!has_role("Cadet", Rank::Constable));
    }
}
