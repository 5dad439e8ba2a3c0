use anchor_lang::prelude::Pubkey;
use anchor_lang::AnchorSerialize;
use pda_escrow::{Prefix, ESCROW, ID, PREFIX};

#[test]
fn declared_program_id_is_stable() {
    assert_eq!(ID.to_string(), "AdJwsRbBvU8wufdFkLqfFuGxtvxFwsCrJEiVSBM3aAA6");
}

#[test]
fn prefix_record_address_depends_on_amount() {
    let payer = Pubkey::new_unique();
    let (small, _) = Pubkey::find_program_address(
        &[PREFIX.as_bytes(), payer.as_ref(), &1_000u64.to_le_bytes()],
        &ID,
    );
    let (large, _) = Pubkey::find_program_address(
        &[PREFIX.as_bytes(), payer.as_ref(), &2_000u64.to_le_bytes()],
        &ID,
    );
    assert_ne!(small, large);
}

#[test]
fn escrow_address_is_per_user_not_per_amount() {
    let payer = Pubkey::new_unique();
    let other = Pubkey::new_unique();
    let (ours, _) = Pubkey::find_program_address(
        &[PREFIX.as_bytes(), payer.as_ref(), ESCROW.as_bytes()],
        &ID,
    );
    let (theirs, _) = Pubkey::find_program_address(
        &[PREFIX.as_bytes(), other.as_ref(), ESCROW.as_bytes()],
        &ID,
    );
    // no amount in the seeds, so the address only moves with the user key
    assert_ne!(ours, theirs);
}

#[test]
fn canonical_bump_revalidates() {
    let payer = Pubkey::new_unique();
    let (addr, bump) = Pubkey::find_program_address(
        &[PREFIX.as_bytes(), payer.as_ref(), ESCROW.as_bytes()],
        &ID,
    );
    let derived = Pubkey::create_program_address(
        &[PREFIX.as_bytes(), payer.as_ref(), ESCROW.as_bytes(), &[bump]],
        &ID,
    )
    .unwrap();
    assert_eq!(addr, derived);
}

#[test]
fn prefix_len_matches_serialized_size() {
    let record = Prefix {
        bump: 255,
        amount: u64::MAX,
    };
    let mut buf = Vec::new();
    record.serialize(&mut buf).unwrap();
    assert_eq!(buf.len(), Prefix::LEN);
}
