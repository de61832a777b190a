use super::*;

/// Artwork variant displayed by every token at a given time.
///
/// Serialized as its index, so `A`, `B` and `C` are `0`, `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// Phase that is active at `now` for a collection deployed at
    /// `deployed_at`, advancing once every `phase_duration` and wrapping
    /// around after `Phase::C`.
    pub fn at(deployed_at: Timestamp, phase_duration: Duration, now: Timestamp) -> Self {
        // Slot time before deployment counts as no time elapsed.
        let elapsed = now
            .timestamp_millis()
            .saturating_sub(deployed_at.timestamp_millis());
        let steps = elapsed.checked_div(phase_duration.millis()).unwrap_or(0);

        match steps % PHASE_COUNT {
            0 => Phase::A,
            1 => Phase::B,
            _ => Phase::C,
        }
    }

    /// Suffix of the metadata document name for this phase.
    pub fn suffix(self) -> char {
        match self {
            Phase::A => 'a',
            Phase::B => 'b',
            Phase::C => 'c',
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    fn deployed_at() -> Timestamp {
        Timestamp::from_timestamp_millis(1_000_000)
    }

    fn after(duration: Duration) -> Timestamp {
        deployed_at()
            .checked_add(duration)
            .expect_report("Timestamp overflow")
    }

    #[concordium_test]
    fn test_phase_cycles_every_duration() {
        let duration = Duration::from_days(120);

        claim_eq!(Phase::at(deployed_at(), duration, deployed_at()), Phase::A);
        claim_eq!(Phase::at(deployed_at(), duration, after(Duration::from_days(120))), Phase::B);
        claim_eq!(Phase::at(deployed_at(), duration, after(Duration::from_days(240))), Phase::C);
        claim_eq!(Phase::at(deployed_at(), duration, after(Duration::from_days(360))), Phase::A);
        claim_eq!(Phase::at(deployed_at(), duration, after(Duration::from_days(480))), Phase::B);
    }

    #[concordium_test]
    fn test_phase_changes_exactly_at_boundary() {
        let duration = Duration::from_days(120);
        let boundary = Duration::from_days(120).millis();

        claim_eq!(
            Phase::at(deployed_at(), duration, after(Duration::from_millis(boundary - 1))),
            Phase::A
        );
        claim_eq!(
            Phase::at(deployed_at(), duration, after(Duration::from_millis(boundary))),
            Phase::B
        );
    }

    #[concordium_test]
    fn test_phase_before_deployment_is_first() {
        let duration = Duration::from_days(120);
        let now = Timestamp::from_timestamp_millis(0);

        claim_eq!(Phase::at(deployed_at(), duration, now), Phase::A);
    }

    #[concordium_test]
    fn test_phase_serial_and_suffix() {
        claim_eq!(to_bytes(&Phase::A), vec![0u8]);
        claim_eq!(to_bytes(&Phase::B), vec![1u8]);
        claim_eq!(to_bytes(&Phase::C), vec![2u8]);
        claim_eq!(Phase::A.suffix(), 'a');
        claim_eq!(Phase::B.suffix(), 'b');
        claim_eq!(Phase::C.suffix(), 'c');
    }
}
