//! # Live Pipeline
//!
//! The live `SmartContract` variant exercised against collaborator
//! doubles: snapshot acquisition and guaranteed release for read calls,
//! receipt-driven completion for mutating calls, and ordering
//! independence between concurrent submissions.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use ledgercall::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const REGISTRY_SOURCE: &str = r#"{
        "Registry": {
            "functions": [
                { "name": "lookup", "inputs": 1, "outputs": 1 },
                { "name": "record", "inputs": 1, "outputs": 1 },
                { "name": "echo",   "inputs": 1, "outputs": 1 }
            ]
        }
    }"#;

    fn registry_interface() -> InterfaceDescriptor {
        InterfaceDescriptor::new(
            "Registry",
            vec![
                MethodDescriptor::new(
                    "lookup",
                    vec![TargetType::Scalar(ScalarType::I64)],
                    TargetType::Scalar(ScalarType::Str),
                ),
                MethodDescriptor::new(
                    "record",
                    vec![TargetType::Scalar(ScalarType::Str)],
                    TargetType::Unit,
                ),
                MethodDescriptor::new(
                    "echo",
                    vec![TargetType::Scalar(ScalarType::I64)],
                    TargetType::asynchronous(TargetType::Scalar(ScalarType::I64)),
                ),
            ],
        )
    }

    /// Chain-state double: counts live snapshots and serves a scripted
    /// read result. Failing mode reverts every execution.
    struct ScriptedChain {
        live_snapshots: Arc<AtomicUsize>,
        revert: bool,
    }

    struct ScriptedSnapshot {
        live_snapshots: Arc<AtomicUsize>,
        revert: bool,
    }

    impl ChainState for ScriptedChain {
        fn snapshot_at(
            &self,
            _block: BlockRef,
        ) -> Result<Box<dyn StateSnapshot>, ExecutionError> {
            self.live_snapshots.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ScriptedSnapshot {
                live_snapshots: Arc::clone(&self.live_snapshots),
                revert: self.revert,
            }))
        }
    }

    impl StateSnapshot for ScriptedSnapshot {
        fn execute_call(&mut self, tx: &CallTransaction) -> Result<Bytes, ExecutionError> {
            assert!(tx.value.is_zero(), "read calls carry no value");
            if self.revert {
                return Err(ExecutionError::Reverted {
                    reason: "scripted revert".into(),
                });
            }
            encode_output(&[WireValue::Str("found".into())])
        }
    }

    impl Drop for ScriptedSnapshot {
        fn drop(&mut self) {
            self.live_snapshots.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Submitter double that buffers submissions and releases their
    /// receipts in reverse submission order once `release_after` have
    /// arrived. Each receipt echoes the transaction's first argument.
    struct ReverseOrderSubmitter {
        release_after: usize,
        pending: Mutex<Vec<(SignedTransaction, oneshot::Sender<TransactionReceipt>)>>,
    }

    impl ReverseOrderSubmitter {
        fn new(release_after: usize) -> Self {
            Self {
                release_after,
                pending: Mutex::new(Vec::new()),
            }
        }

        fn receipt_for(tx: &SignedTransaction) -> TransactionReceipt {
            // Payload layout: 4-byte selector, then the encoded args.
            // A one-arg sequence decodes through the same codec as a
            // one-output result.
            let args = decode_output(
                &ContractFunction::new("echo", 1, 1),
                &tx.payload.as_slice()[4..],
            )
            .expect("well-formed payload");
            TransactionReceipt {
                transaction: tx.id,
                execution_output: encode_output(&[args[0].clone()]).expect("encodable output"),
            }
        }
    }

    #[async_trait]
    impl TransactionSubmitter for ReverseOrderSubmitter {
        async fn submit(
            &self,
            tx: SignedTransaction,
        ) -> Result<TransactionReceipt, ExecutionError> {
            let (done, receipt) = oneshot::channel();
            {
                let mut pending = self.pending.lock().unwrap();
                pending.push((tx, done));
                if pending.len() == self.release_after {
                    for (tx, done) in pending.drain(..).rev() {
                        let _ = done.send(Self::receipt_for(&tx));
                    }
                }
            }
            receipt.await.map_err(|_| ExecutionError::Submission {
                reason: "submitter dropped the receipt".into(),
            })
        }
    }

    /// Submitter double whose receipts never arrive.
    struct SilentSubmitter;

    #[async_trait]
    impl TransactionSubmitter for SilentSubmitter {
        async fn submit(
            &self,
            _tx: SignedTransaction,
        ) -> Result<TransactionReceipt, ExecutionError> {
            std::future::pending().await
        }
    }

    fn live_gateway(
        chain: Arc<dyn ChainState>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> ContractGateway {
        let mut gateway = ContractGateway::new(
            Arc::new(ManifestCompiler),
            Arc::new(LedgerPlatform::new(chain, submitter)),
            Arc::new(ConverterRegistry::standard()),
        );
        gateway
            .register(
                &registry_interface(),
                REGISTRY_SOURCE,
                "Registry",
                Address::new([0xEE; 20]),
                SigningIdentity::new([3u8; 32]),
            )
            .expect("registration succeeds");
        gateway
    }

    // =============================================================================
    // READ CALLS AND SNAPSHOTS
    // =============================================================================

    #[tokio::test]
    async fn read_call_acquires_and_releases_one_snapshot() {
        let live = Arc::new(AtomicUsize::new(0));
        let gateway = live_gateway(
            Arc::new(ScriptedChain {
                live_snapshots: Arc::clone(&live),
                revert: false,
            }),
            Arc::new(SilentSubmitter),
        );

        let outcome = gateway
            .invoke("registry", "lookup", &[WireValue::Int(1)])
            .unwrap();
        assert_eq!(outcome.completed(), Some(Value::Str("found".into())));
        assert_eq!(live.load(Ordering::SeqCst), 0, "snapshot must be released");
    }

    #[tokio::test]
    async fn reverted_read_call_still_releases_its_snapshot() {
        let live = Arc::new(AtomicUsize::new(0));
        let gateway = live_gateway(
            Arc::new(ScriptedChain {
                live_snapshots: Arc::clone(&live),
                revert: true,
            }),
            Arc::new(SilentSubmitter),
        );

        let err = gateway
            .invoke("registry", "lookup", &[WireValue::Int(1)])
            .unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Execution(ExecutionError::Reverted { .. })
        ));
        assert_eq!(live.load(Ordering::SeqCst), 0, "snapshot must be released");
    }

    // =============================================================================
    // MUTATING CALLS
    // =============================================================================

    #[tokio::test]
    async fn fire_and_forget_returns_before_any_receipt_exists() {
        let live = Arc::new(AtomicUsize::new(0));
        let gateway = live_gateway(
            Arc::new(ScriptedChain {
                live_snapshots: live,
                revert: false,
            }),
            // Receipts never arrive; a blocking dispatch would hang here.
            Arc::new(SilentSubmitter),
        );

        let outcome = gateway
            .invoke("registry", "record", &[WireValue::Str("x".into())])
            .unwrap();
        assert!(matches!(outcome, CallOutcome::Accepted));
    }

    #[tokio::test]
    async fn concurrent_mutating_calls_keep_their_own_results() {
        let live = Arc::new(AtomicUsize::new(0));
        let gateway = live_gateway(
            Arc::new(ScriptedChain {
                live_snapshots: live,
                revert: false,
            }),
            Arc::new(ReverseOrderSubmitter::new(2)),
        );

        let first = gateway
            .invoke("registry", "echo", &[WireValue::Int(1)])
            .unwrap()
            .pending()
            .expect("async method stays pending");
        let second = gateway
            .invoke("registry", "echo", &[WireValue::Int(2)])
            .unwrap()
            .pending()
            .expect("async method stays pending");

        // Receipts arrive in reverse submission order; each pending
        // value must still resolve with its own call's output.
        let (first, second) = tokio::join!(first.resolve(), second.resolve());
        assert_eq!(first.unwrap(), Value::I64(1));
        assert_eq!(second.unwrap(), Value::I64(2));
    }

    #[tokio::test]
    async fn submission_failure_surfaces_on_the_async_channel() {
        struct FailingSubmitter;

        #[async_trait]
        impl TransactionSubmitter for FailingSubmitter {
            async fn submit(
                &self,
                _tx: SignedTransaction,
            ) -> Result<TransactionReceipt, ExecutionError> {
                Err(ExecutionError::Submission {
                    reason: "mempool unavailable".into(),
                })
            }
        }

        let live = Arc::new(AtomicUsize::new(0));
        let gateway = live_gateway(
            Arc::new(ScriptedChain {
                live_snapshots: live,
                revert: false,
            }),
            Arc::new(FailingSubmitter),
        );

        let pending = gateway
            .invoke("registry", "echo", &[WireValue::Int(5)])
            .unwrap()
            .pending()
            .expect("async method stays pending");
        let err = pending.resolve().await.unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Execution(ExecutionError::Submission { .. })
        ));
    }
}
