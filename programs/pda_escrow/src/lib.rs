#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

// seed constants for the two per-user records
pub const PREFIX: &str = "prefix";
pub const ESCROW: &str = "escrow";

declare_id!("AdJwsRbBvU8wufdFkLqfFuGxtvxFwsCrJEiVSBM3aAA6");

#[program]
pub mod pda_escrow {
    use super::*;

    /// Open an escrow for the payer.
    /// - Creates the prefix record PDA (seeded by payer key and amount) and
    ///   stores the canonical bump plus the escrowed amount.
    /// - Funds the escrow PDA with `amount` lamports via system transfer; the
    ///   escrow account is never allocated, it only carries a balance.
    /// - Parameters:
    ///    - prefix_bump: caller-derived bump for the prefix record; must match
    ///      the canonical bump found during account validation.
    ///    - escrow_bump: bump for the escrow PDA, checked by the seeds constraint.
    ///    - amount: lamports to move into escrow (must be non-zero).
    pub fn initialize(
        ctx: Context<Initialize>,
        prefix_bump: u8,
        _escrow_bump: u8,
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, EscrowError::ZeroAmount);
        require_eq!(
            prefix_bump,
            ctx.bumps.prefix_account,
            EscrowError::BumpMismatch
        );

        let prefix_account = &mut ctx.accounts.prefix_account;
        prefix_account.bump = ctx.bumps.prefix_account;
        prefix_account.amount = amount;

        msg!(
            "initialize: funding escrow {} with {} lamports",
            ctx.accounts.escrow_account.key(),
            amount
        );

        transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.escrow_account.to_account_info(),
                },
            ),
            amount,
        )?;

        Ok(())
    }

    /// Close the user's escrow, returning everything to the user.
    /// - Drains the prefix record directly (the program owns it) and credits
    ///   the reclaimed lamports to `user`.
    /// - Drains the escrow PDA through a system transfer signed with the
    ///   escrow seeds.
    /// - Any payer may submit this; funds always land on `user`.
    pub fn close(ctx: Context<Close>, escrow_bump: u8) -> Result<()> {
        let prefix_account = &ctx.accounts.prefix_account;
        let escrow_account = &ctx.accounts.escrow_account;
        let user = &ctx.accounts.user;

        let prefix_info = prefix_account.to_account_info();
        let user_info = user.to_account_info();
        let reclaimed = prefix_info.lamports();

        msg!("close: user lamports before reclaim: {}", user_info.lamports());

        // prefix record is program-owned, so it is closed by direct lamport moves
        let credited = user_info
            .lamports()
            .checked_add(reclaimed)
            .ok_or(EscrowError::NumericalOverflow)?;
        **prefix_info.try_borrow_mut_lamports()? = 0;
        **user_info.try_borrow_mut_lamports()? = credited;

        msg!("close: user lamports after reclaim: {}", user_info.lamports());

        // escrow PDA is system-owned; drain it with a signed system transfer
        let user_key = user.key();
        let escrow_seeds = [
            PREFIX.as_bytes(),
            user_key.as_ref(),
            ESCROW.as_bytes(),
            &[escrow_bump],
        ];

        transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: escrow_account.to_account_info(),
                    to: user.to_account_info(),
                },
                &[&escrow_seeds],
            ),
            escrow_account.lamports(),
        )?;

        Ok(())
    }
}

/* ---------------------- ACCOUNTS ---------------------- */

#[derive(Accounts)]
#[instruction(prefix_bump: u8, escrow_bump: u8, amount: u64)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Prefix record: one per (payer, amount)
    #[account(
        init,
        payer = payer,
        space = 8 + Prefix::LEN,
        seeds = [PREFIX.as_bytes(), payer.key().as_ref(), &amount.to_le_bytes()],
        bump
    )]
    pub prefix_account: Account<'info, Prefix>,

    /// Escrow PDA holding the lamport balance; stays system-owned
    /// CHECK: PDA derived and verified via seeds
    #[account(
        mut,
        seeds = [PREFIX.as_bytes(), payer.key().as_ref(), ESCROW.as_bytes()],
        bump = escrow_bump
    )]
    pub escrow_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(escrow_bump: u8)]
pub struct Close<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Recipient of the reclaimed lamports; also the key both PDAs derive from
    /// CHECK: only credited, never debited or deserialized
    #[account(mut)]
    pub user: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [PREFIX.as_bytes(), user.key().as_ref(), &prefix_account.amount.to_le_bytes()],
        bump = prefix_account.bump
    )]
    pub prefix_account: Account<'info, Prefix>,

    /// CHECK: PDA derived and verified via seeds
    #[account(
        mut,
        seeds = [PREFIX.as_bytes(), user.key().as_ref(), ESCROW.as_bytes()],
        bump = escrow_bump
    )]
    pub escrow_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/* ---------------------- STATE ---------------------- */

#[account]
#[derive(Default)]
pub struct Prefix {
    pub bump: u8,
    pub amount: u64,
}

impl Prefix {
    // size calc
    pub const LEN: usize =
        1 + // bump
        8;  // amount
}

/* ---------------------- ERRORS ---------------------- */

#[error_code]
pub enum EscrowError {
    #[msg("Numerical overflow")]
    NumericalOverflow,
    #[msg("Zero amounts are not allowed")]
    ZeroAmount,
    #[msg("Supplied bump does not match the canonical bump")]
    BumpMismatch,
}
