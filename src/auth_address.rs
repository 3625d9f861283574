use crate::chain_client::ChainClient;
use crate::error::Result;
use crate::relayer_client::RelayerClient;
use ethers_core::types::Address;
use tracing::info;

/// Derives the email auth address of `owner` for the given account code.
///
/// The relayer supplies the account salt; the contract performs the
/// derivation so the result always agrees with the on-chain computation.
pub async fn resolve_email_auth_address<C, R>(
    chain: &C,
    relayer: &R,
    contract: Address,
    account_code: &str,
    email_address: &str,
    owner: Address,
) -> Result<Address>
where
    C: ChainClient + ?Sized,
    R: RelayerClient + ?Sized,
{
    let salt = relayer
        .account_salt(account_code.to_string(), email_address.to_string())
        .await?;
    let email_auth_addr = chain
        .compute_email_auth_address(contract, owner, salt)
        .await?;
    info!(?email_auth_addr, "resolved email auth address");
    Ok(email_auth_addr)
}

/// Whether the account code has to travel inside the email.
///
/// True only when the chain reports the "no code" sentinel for the address;
/// any returned code, even an empty one, counts as deployed.
pub async fn code_exists_in_email<C: ChainClient + ?Sized>(
    chain: &C,
    email_auth_addr: Address,
) -> Result<bool> {
    let code = chain.get_code(email_auth_addr).await?;
    info!(?email_auth_addr, code = ?code, "fetched email auth code");
    Ok(code.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_client::MockChainClient;
    use crate::error::Error;
    use crate::relayer_client::MockRelayerClient;
    use crate::types::AccountSalt;
    use ethers_core::types::Bytes;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn salt_from_relayer_feeds_contract_derivation() {
        let contract = Address::repeat_byte(0x01);
        let owner = Address::repeat_byte(0x02);
        let derived = Address::repeat_byte(0x03);

        let mut relayer = MockRelayerClient::new();
        relayer
            .expect_account_salt()
            .with(eq("0x1234".to_string()), eq("alice@example.com".to_string()))
            .times(1)
            .returning(|_, _| Ok(AccountSalt("0xabc".into())));
        let mut chain = MockChainClient::new();
        chain
            .expect_compute_email_auth_address()
            .with(eq(contract), eq(owner), eq(AccountSalt("0xabc".into())))
            .times(1)
            .returning(move |_, _, _| Ok(derived));

        let addr = resolve_email_auth_address(
            &chain,
            &relayer,
            contract,
            "0x1234",
            "alice@example.com",
            owner,
        )
        .await
        .unwrap();
        assert_eq!(addr, derived);
    }

    #[tokio::test]
    async fn relayer_failure_skips_chain_read() {
        let mut relayer = MockRelayerClient::new();
        relayer
            .expect_account_salt()
            .returning(|_, _| Err(Error::relayer("accountSalt", "connection refused")));
        let mut chain = MockChainClient::new();
        chain.expect_compute_email_auth_address().never();

        let err = resolve_email_auth_address(
            &chain,
            &relayer,
            Address::zero(),
            "0x1234",
            "alice@example.com",
            Address::zero(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::RelayerRequest { .. }));
    }

    #[tokio::test]
    async fn only_missing_code_requires_code_in_email() {
        let mut chain = MockChainClient::new();
        chain
            .expect_get_code()
            .with(eq(Address::repeat_byte(0xaa)))
            .returning(|_| Ok(None));
        chain
            .expect_get_code()
            .with(eq(Address::repeat_byte(0xbb)))
            .returning(|_| Ok(Some(Bytes::default())));
        chain
            .expect_get_code()
            .with(eq(Address::repeat_byte(0xcc)))
            .returning(|_| Ok(Some(Bytes::from(vec![0x60, 0x80]))));

        assert!(code_exists_in_email(&chain, Address::repeat_byte(0xaa))
            .await
            .unwrap());
        assert!(!code_exists_in_email(&chain, Address::repeat_byte(0xbb))
            .await
            .unwrap());
        assert!(!code_exists_in_email(&chain, Address::repeat_byte(0xcc))
            .await
            .unwrap());
    }
}
