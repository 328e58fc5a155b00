/*
 * Popular token lists per chain and token search
 */

use crate::models::Token;

pub const NATIVE_TOKEN_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

pub const SUPPORTED_CHAINS: [u64; 5] = [1, 10, 137, 8453, 42161];

type TokenRow = (&'static str, &'static str, u8, &'static str);

const ETHEREUM: &[TokenRow] = &[
    ("ETH", NATIVE_TOKEN_ADDRESS, 18, "Ethereum"),
    ("WETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", 18, "Wrapped Ether"),
    ("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", 6, "USD Coin"),
    ("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7", 6, "Tether USD"),
    ("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F", 18, "Dai Stablecoin"),
    ("WBTC", "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", 8, "Wrapped Bitcoin"),
    ("UNI", "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", 18, "Uniswap"),
    ("LINK", "0x514910771AF9Ca656af840dff83E8264EcF986CA", 18, "Chainlink"),
    ("PEPE", "0x6982508145454Ce325dDbE47a25d4ec3d2311933", 18, "Pepe"),
    ("SHIB", "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE", 18, "Shiba Inu"),
    ("AAVE", "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9", 18, "Aave"),
    ("CRV", "0xD533a949740bb3306d119CC777fa900bA034cd52", 18, "Curve DAO"),
];

const POLYGON: &[TokenRow] = &[
    ("MATIC", "0x0000000000000000000000000000000000001010", 18, "Polygon"),
    ("WMATIC", "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270", 18, "Wrapped MATIC"),
    ("USDC", "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174", 6, "USD Coin"),
    ("USDT", "0xc2132D05D31c914a87C6611C10748AEb04B58e8F", 6, "Tether USD"),
    ("WETH", "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619", 18, "Wrapped Ethereum"),
    ("WBTC", "0x1bfd67037b42cf73acf2047067bd4f2c47d9bfd6", 8, "Wrapped Bitcoin"),
    ("DAI", "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063", 18, "Dai Stablecoin"),
    ("AAVE", "0xD6DF932A45C0f255f85145f286eA0b292B21C90B", 18, "Aave"),
];

const ARBITRUM: &[TokenRow] = &[
    ("ETH", NATIVE_TOKEN_ADDRESS, 18, "Ethereum"),
    ("WETH", "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1", 18, "Wrapped Ether"),
    ("USDC", "0xaf88d065e77c8cC2239327C5EDb3A432268e5831", 6, "USD Coin"),
    ("USDC.e", "0xFF970A61A04b1cA14834A43f5dE4533eBDDB5CC8", 6, "USD Coin (Bridged)"),
    ("USDT", "0xFd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9", 6, "Tether USD"),
    ("ARB", "0x912CE59144191C1204E64559FE8253a0e49E6548", 18, "Arbitrum"),
    ("WBTC", "0x2f2a2543B76A4166549F7aaB2e75Bef0aefC5B0f", 8, "Wrapped Bitcoin"),
    ("LINK", "0xf97f4df75117a78c1A5a0DBb814Af92458539FB4", 18, "Chainlink"),
    ("UNI", "0xFa7F8980b0f1E64A2062791cc3b0871572f1F7f0", 18, "Uniswap"),
];

const OPTIMISM: &[TokenRow] = &[
    ("ETH", NATIVE_TOKEN_ADDRESS, 18, "Ethereum"),
    ("WETH", "0x4200000000000000000000000000000000000006", 18, "Wrapped Ether"),
    ("USDC", "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85", 6, "USD Coin"),
    ("USDT", "0x94b008aA00579c1307B0EF2c499aD98a8ce58e58", 6, "Tether USD"),
    ("OP", "0x4200000000000000000000000000000000000042", 18, "Optimism"),
    ("WBTC", "0x68f180fcCe6836688e9084f035309E29Bf0A2095", 8, "Wrapped Bitcoin"),
];

const BASE: &[TokenRow] = &[
    ("ETH", NATIVE_TOKEN_ADDRESS, 18, "Ethereum"),
    ("WETH", "0x4200000000000000000000000000000000000006", 18, "Wrapped Ether"),
    ("USDC", "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", 6, "USD Coin"),
    ("DAI", "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb", 18, "Dai Stablecoin"),
    ("DEGEN", "0x4ed4E862860beD51a9570b96d89aF5E1B0Efefed", 18, "Degen"),
];

fn rows_for_chain(chain_id: u64) -> &'static [TokenRow] {
    match chain_id {
        10 => OPTIMISM,
        137 => POLYGON,
        8453 => BASE,
        42161 => ARBITRUM,
        // unknown chains show the mainnet list
        _ => ETHEREUM,
    }
}

#[must_use]
pub fn tokens_for_chain(chain_id: u64) -> Vec<Token> {
    rows_for_chain(chain_id)
        .iter()
        .map(|(symbol, address, decimals, name)| Token {
            symbol: (*symbol).to_string(),
            address: (*address).to_string(),
            decimals: *decimals,
            name: (*name).to_string(),
        })
        .collect()
}

/// Case-insensitive substring match on symbol or name.
#[must_use]
pub fn search(chain_id: u64, term: &str) -> Vec<Token> {
    let needle = term.trim().to_lowercase();
    tokens_for_chain(chain_id)
        .into_iter()
        .filter(|token| {
            token.symbol.to_lowercase().contains(&needle)
                || token.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Resolves a token by exact symbol (case-insensitive) or address.
#[must_use]
pub fn find(chain_id: u64, reference: &str) -> Option<Token> {
    let reference = reference.trim();
    tokens_for_chain(chain_id).into_iter().find(|token| {
        token.symbol.eq_ignore_ascii_case(reference)
            || token.address.eq_ignore_ascii_case(reference)
    })
}

#[must_use]
pub fn chain_name(chain_id: u64) -> String {
    match chain_id {
        1 => "Ethereum".to_string(),
        10 => "Optimism".to_string(),
        137 => "Polygon".to_string(),
        8453 => "Base".to_string(),
        42161 => "Arbitrum".to_string(),
        other => format!("Chain {other}"),
    }
}

#[must_use]
pub fn is_supported_chain(chain_id: u64) -> bool {
    SUPPORTED_CHAINS.contains(&chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_symbol_and_name() {
        let by_symbol = search(1, "usd");
        let symbols: Vec<_> = by_symbol.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["USDC", "USDT"]);

        let by_name = search(1, "wrapped");
        assert_eq!(by_name.len(), 2);
        assert!(by_name.iter().all(|t| t.name.starts_with("Wrapped")));
    }

    #[test]
    fn empty_search_returns_whole_list() {
        assert_eq!(search(8453, "").len(), tokens_for_chain(8453).len());
    }

    #[test]
    fn unknown_chain_falls_back_to_mainnet() {
        assert_eq!(tokens_for_chain(999), tokens_for_chain(1));
        assert_eq!(chain_name(999), "Chain 999");
        assert!(!is_supported_chain(999));
    }

    #[test]
    fn find_by_symbol_or_address() {
        let usdc = find(42161, "usdc").unwrap();
        assert_eq!(usdc.decimals, 6);
        let same = find(42161, &usdc.address.to_uppercase().replace("0X", "0x")).unwrap();
        assert_eq!(same, usdc);
        assert!(find(42161, "DEGEN").is_none());
    }
}
