//! # Gateway Flows
//!
//! Register + invoke through the in-memory harness: one gateway, a
//! manifest-compiled contract, and a simulated ledger providing the
//! function behaviours. Exercises all three call modes and the
//! registration failure paths end to end.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ledgercall::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TOKEN_SOURCE: &str = r#"{
        "Token": {
            "functions": [
                { "name": "balanceOf", "inputs": 1, "outputs": 1 },
                { "name": "transfer",  "inputs": 2, "outputs": 1 },
                { "name": "holderOf",  "inputs": 1, "outputs": 2 },
                { "name": "holders",   "inputs": 0, "outputs": 1 }
            ]
        }
    }"#;

    fn address(seed: u8) -> Address {
        Address::new([seed; 20])
    }

    /// The Token interface with every call mode represented.
    fn token_interface() -> InterfaceDescriptor {
        InterfaceDescriptor::new(
            "Token",
            vec![
                // Sync read: balanceOf(address) -> i64
                MethodDescriptor::new(
                    "balanceOf",
                    vec![TargetType::Scalar(ScalarType::Address)],
                    TargetType::Scalar(ScalarType::I64),
                ),
                // Fire-and-forget: transfer(address, i64) -> void
                MethodDescriptor::new(
                    "transfer",
                    vec![
                        TargetType::Scalar(ScalarType::Address),
                        TargetType::Scalar(ScalarType::I64),
                    ],
                    TargetType::Unit,
                ),
                // Sync read with a composite return
                MethodDescriptor::new(
                    "holderOf",
                    vec![TargetType::Scalar(ScalarType::I64)],
                    TargetType::Composite(CompositeShape::with_fields(
                        "Holder",
                        vec![
                            TargetType::Scalar(ScalarType::Address),
                            TargetType::Scalar(ScalarType::I64),
                        ],
                    )),
                ),
                // Sync read with a collection return
                MethodDescriptor::new(
                    "holders",
                    vec![],
                    TargetType::list_of(TargetType::Scalar(ScalarType::Address)),
                ),
            ],
        )
    }

    /// A harness gateway with the Token contract registered and its
    /// behaviours provided.
    fn token_gateway() -> (ContractGateway, Arc<SimulatedLedger>) {
        let (mut gateway, ledger) = ContractGateway::harness();

        ledger.provide_function("balanceOf", |_| Ok(vec![WireValue::Uint(U256::from(1_000u64))]));
        let slots = Arc::clone(&ledger);
        ledger.provide_function("transfer", move |args| {
            slots.write_slot("last_transfer", args[1].clone());
            Ok(vec![WireValue::Bool(true)])
        });
        ledger.provide_function("holderOf", |_| {
            Ok(vec![
                WireValue::Address(Address::new([7u8; 20])),
                WireValue::Int(42),
            ])
        });
        ledger.provide_function("holders", |_| {
            Ok(vec![WireValue::Seq(vec![
                WireValue::Address(Address::new([1u8; 20])),
                WireValue::Address(Address::new([2u8; 20])),
            ])])
        });

        gateway
            .register(
                &token_interface(),
                TOKEN_SOURCE,
                "Token",
                address(0xCC),
                SigningIdentity::new([9u8; 32]),
            )
            .expect("registration succeeds");
        (gateway, ledger)
    }

    // =============================================================================
    // CALL MODE SCENARIOS
    // =============================================================================

    #[test]
    fn balance_of_is_a_sync_read_decoded_to_i64() {
        crate::init_test_tracing();
        let (gateway, _ledger) = token_gateway();

        let outcome = gateway
            .invoke("token", "balanceOf", &[WireValue::Address(address(0xAA))])
            .unwrap();
        let value = outcome.completed().expect("sync read completes in place");
        assert_eq!(i64::try_from(value).unwrap(), 1_000);
    }

    #[test]
    fn void_transfer_fires_and_forgets_but_executes() {
        let (gateway, ledger) = token_gateway();

        let outcome = gateway
            .invoke(
                "token",
                "transfer",
                &[WireValue::Address(address(0xBB)), WireValue::Int(250)],
            )
            .unwrap();

        assert!(matches!(outcome, CallOutcome::Accepted));
        // The mutation happened even though nothing was decoded.
        assert_eq!(ledger.read_slot("last_transfer"), Some(WireValue::Int(250)));
    }

    #[tokio::test]
    async fn async_transfer_resolves_a_decoded_boolean() {
        let (mut gateway, ledger) = ContractGateway::harness();
        ledger.provide_function("transfer", |_| Ok(vec![WireValue::Bool(true)]));

        let interface = InterfaceDescriptor::new(
            "Checked",
            vec![MethodDescriptor::new(
                "transfer",
                vec![
                    TargetType::Scalar(ScalarType::Address),
                    TargetType::Scalar(ScalarType::I64),
                ],
                TargetType::asynchronous(TargetType::Scalar(ScalarType::Bool)),
            )],
        );
        let source = r#"{
            "Checked": {
                "functions": [ { "name": "transfer", "inputs": 2, "outputs": 1 } ]
            }
        }"#;
        gateway
            .register(
                &interface,
                source,
                "Checked",
                address(0xCC),
                SigningIdentity::placeholder(),
            )
            .unwrap();

        let outcome = gateway
            .invoke(
                "checked",
                "transfer",
                &[WireValue::Address(address(0xBB)), WireValue::Int(1)],
            )
            .unwrap();
        let pending = outcome.pending().expect("async method stays pending");
        assert_eq!(pending.resolve().await.unwrap(), Value::Bool(true));
    }

    // =============================================================================
    // RECONSTRUCTION THROUGH THE GATEWAY
    // =============================================================================

    #[test]
    fn composite_return_assembles_fields_in_order() {
        let (gateway, _ledger) = token_gateway();

        let outcome = gateway
            .invoke("token", "holderOf", &[WireValue::Int(0)])
            .unwrap();
        assert_eq!(
            outcome.completed().unwrap(),
            Value::Composite {
                name: "Holder".into(),
                fields: vec![Value::Address(Address::new([7u8; 20])), Value::I64(42)],
            }
        );
    }

    #[test]
    fn collection_return_is_element_wise() {
        let (gateway, _ledger) = token_gateway();

        let outcome = gateway.invoke("token", "holders", &[]).unwrap();
        let holders: Vec<Address> = outcome.completed().unwrap().try_into().unwrap();
        assert_eq!(
            holders,
            vec![Address::new([1u8; 20]), Address::new([2u8; 20])]
        );
    }

    // =============================================================================
    // REGISTRATION FAILURES
    // =============================================================================

    #[test]
    fn superfluous_interface_method_fails_and_binds_nothing() {
        let (mut gateway, _ledger) = ContractGateway::harness();

        // Interface exposes {a, b}; contract exposes {a, c}.
        let interface = InterfaceDescriptor::new(
            "Mismatch",
            vec![
                MethodDescriptor::new("a", vec![], TargetType::Scalar(ScalarType::I64)),
                MethodDescriptor::new("b", vec![], TargetType::Scalar(ScalarType::I64)),
            ],
        );
        let source = r#"{
            "Mismatch": {
                "functions": [
                    { "name": "a", "inputs": 0, "outputs": 1 },
                    { "name": "c", "inputs": 0, "outputs": 1 }
                ]
            }
        }"#;

        let err = gateway
            .register(
                &interface,
                source,
                "Mismatch",
                address(1),
                SigningIdentity::placeholder(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            RegistrationError::SuperfluousMethod {
                interface: "Mismatch".into(),
                methods: vec!["b".into()],
            }
        );
        // The registry stays without a binding for that logical name.
        assert!(gateway.bindings().get("mismatch").is_none());
        assert!(matches!(
            gateway.invoke("mismatch", "a", &[]).unwrap_err(),
            InvokeError::ContractNotFound { .. }
        ));
    }

    #[test]
    fn interface_arity_two_against_contract_arity_one_fails() {
        let (mut gateway, _ledger) = ContractGateway::harness();

        let interface = InterfaceDescriptor::new(
            "Narrow",
            vec![MethodDescriptor::new(
                "a",
                vec![
                    TargetType::Scalar(ScalarType::I64),
                    TargetType::Scalar(ScalarType::I64),
                ],
                TargetType::Unit,
            )],
        );
        let source = r#"{
            "Narrow": { "functions": [ { "name": "a", "inputs": 1, "outputs": 0 } ] }
        }"#;

        let err = gateway
            .register(
                &interface,
                source,
                "Narrow",
                address(1),
                SigningIdentity::placeholder(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            RegistrationError::ArityMismatch {
                function: "a".into(),
                interface_arity: 2,
                contract_arity: 1,
            }
        );
        assert!(gateway.bindings().is_empty());
    }

    #[test]
    fn duplicate_registration_keeps_the_original_dispatchable() {
        let (mut gateway, _ledger) = token_gateway();

        let err = gateway
            .register(
                &token_interface(),
                TOKEN_SOURCE,
                "token",
                address(0xDD),
                SigningIdentity::placeholder(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::DuplicateRegistration { .. }
        ));

        // The original binding still serves calls.
        let outcome = gateway
            .invoke("token", "balanceOf", &[WireValue::Address(address(1))])
            .unwrap();
        assert!(outcome.completed().is_some());
    }

    // =============================================================================
    // DISPATCH FAILURES
    // =============================================================================

    #[test]
    fn unknown_method_surfaces_available_function_names() {
        let (gateway, _ledger) = token_gateway();

        let err = gateway.invoke("token", "mint", &[]).unwrap_err();
        match err {
            InvokeError::Execution(ExecutionError::FunctionNotFound { name, available }) => {
                assert_eq!(name, "mint");
                assert!(available.contains(&"balanceOf".to_string()));
                assert!(available.contains(&"transfer".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn argument_count_is_checked_by_the_encoder_not_the_dispatcher() {
        let (gateway, _ledger) = token_gateway();

        // Arguments pass through unconverted; the arity check happens
        // at the encoding boundary.
        let err = gateway.invoke("token", "balanceOf", &[]).unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Execution(ExecutionError::InputArityMismatch { .. })
        ));
    }
}
