use types::phase0::containers::AttestationData;

// > Check if ``data_1`` and ``data_2`` are slashable according to Casper FFG rules.
#[inline]
#[must_use]
pub fn is_slashable_attestation_data(data_1: AttestationData, data_2: AttestationData) -> bool {
    // > Double vote
    (data_1 != data_2 && data_1.target.epoch == data_2.target.epoch)
        // > Surround vote
        || (data_1.source.epoch < data_2.source.epoch && data_2.target.epoch < data_1.target.epoch)
}
