//! Conversion of raw chain values into dashboard text.
use crate::types::BlockRecord;
use fraction::{BigDecimal, BigUint};

pub const WEI_PER_GWEI: u128 = 1_000_000_000;
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
pub const GWEI_DECIMALS: u32 = 9;
pub const ETHER_DECIMALS: u32 = 18;

/// Number of transactions listed under "recent transactions".
pub const RECENT_TRANSACTIONS: usize = 5;
const HASH_PREVIEW_LEN: usize = 20;

fn pow10(exponent: u32) -> BigUint {
    BigUint::pow(&10u32.into(), exponent)
}

/// Exact value of `amount` base units in a unit with `decimals` decimals.
#[must_use]
pub fn to_units(amount: u128, decimals: u32) -> BigDecimal {
    BigDecimal::from(BigUint::from(amount)) / BigDecimal::from(pow10(decimals))
}

/// `amount / 10^decimals`, rounded half up and printed with exactly `precision` digits.
fn fixed(amount: u128, decimals: u32, precision: u32) -> String {
    let unit = pow10(decimals);
    let scale = pow10(precision);
    let scaled = (BigUint::from(amount) * &scale * 2u32 + &unit) / (&unit * 2u32);
    let integer = &scaled / &scale;
    if precision == 0 {
        return integer.to_string();
    }
    let remainder = &scaled % &scale;
    format!("{integer}.{remainder:0>width$}", width = precision as usize)
}

/// `18500001` -> `18,500,001`
#[must_use]
pub fn block_number(number: u64) -> String {
    let digits = number.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[must_use]
pub fn gas_used(gas: u64) -> String {
    format!("{}M", fixed(u128::from(gas), 6, 2))
}

#[must_use]
pub fn gas_price(wei: u128) -> String {
    format!("{} Gwei", fixed(wei, GWEI_DECIMALS, 2))
}

#[must_use]
pub fn difficulty(difficulty: u128) -> String {
    if difficulty == 0 {
        return "0 (PoS)".into();
    }
    format!("{}T", fixed(difficulty, 12, 2))
}

#[must_use]
pub fn balance(address: &str, wei: u128) -> String {
    format!("Address: {address}\nBalance: {} ETH", fixed(wei, ETHER_DECIMALS, 6))
}

/// First few transaction hashes of `block`, one per line.
#[must_use]
pub fn recent_transactions(block: &BlockRecord) -> String {
    if block.transactions.is_empty() {
        return "No transactions in this block".into();
    }
    block
        .transactions
        .iter()
        .take(RECENT_TRANSACTIONS)
        .enumerate()
        .map(|(i, hash)| {
            let preview: String = hash.chars().take(HASH_PREVIEW_LEN).collect();
            format!("TX #{}: {preview}... | Block: {}", i + 1, block.number)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
