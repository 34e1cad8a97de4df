/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Runtime helper for spawning consumer dispatch loops on dedicated threads.

use crate::observability::events;
use crate::transport::{TransportCode, TransportError};
use std::future::Future;
use std::io;
use std::thread;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, error};

pub(crate) const DEFAULT_CONSUMER_RUNTIME_THREAD_NAME: &str = "msg-consumer";
const COMPONENT: &str = "worker_runtime";

/// Handle to a dispatch loop running on its own current-thread Tokio runtime.
pub(crate) struct DispatchLoopHandle {
    worker_thread: String,
    join_handle: thread::JoinHandle<()>,
}

impl DispatchLoopHandle {
    pub(crate) fn worker_thread(&self) -> &str {
        &self.worker_thread
    }

    /// Waits for the loop to return without blocking the calling runtime.
    pub(crate) async fn join(self) -> Result<(), TransportError> {
        let worker_thread = self.worker_thread;
        let join_handle = self.join_handle;

        match tokio::task::spawn_blocking(move || join_handle.join()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_panic)) => {
                error!(
                    event = events::RUNTIME_JOIN_FAILED,
                    component = COMPONENT,
                    worker_thread = worker_thread.as_str(),
                    reason = "dispatch_loop_panicked",
                    "dispatch loop thread panicked"
                );
                Err(TransportError::fail_with_code(
                    TransportCode::Internal,
                    format!("dispatch loop thread {worker_thread} panicked"),
                ))
            }
            Err(err) => {
                error!(
                    event = events::RUNTIME_JOIN_FAILED,
                    component = COMPONENT,
                    worker_thread = worker_thread.as_str(),
                    err = %err,
                    "unable to join dispatch loop thread"
                );
                Err(TransportError::fail_with_code(
                    TransportCode::Internal,
                    format!("unable to join dispatch loop thread {worker_thread}: {err}"),
                ))
            }
        }
    }
}

/// Owns a runtime until the loop thread takes it. Dropped unstarted, the runtime
/// is shut down in the background so async callers never block on it.
struct UnstartedRuntime(Option<Runtime>);

impl Drop for UnstartedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

pub(crate) fn spawn_dispatch_loop<F, Fut>(
    thread_name: String,
    run_loop: F,
) -> Result<DispatchLoopHandle, TransportError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    spawn_dispatch_loop_on(
        thread_name,
        || Builder::new_current_thread().enable_all().build(),
        run_loop,
    )
}

/// Builds the loop's runtime on the calling thread, then moves it onto a new
/// named thread. A runtime that cannot be built fails the spawn.
fn spawn_dispatch_loop_on<B, F, Fut>(
    thread_name: String,
    build_runtime: B,
    run_loop: F,
) -> Result<DispatchLoopHandle, TransportError>
where
    B: FnOnce() -> io::Result<Runtime>,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let runtime = build_runtime().map_err(|err| {
        error!(
            event = events::RUNTIME_BUILD_FAILED,
            component = COMPONENT,
            worker_thread = thread_name.as_str(),
            err = %err,
            "unable to build consumer runtime"
        );
        TransportError::fail_with_code(
            TransportCode::Internal,
            format!("unable to build runtime for consumer thread {thread_name}: {err}"),
        )
    })?;

    let runtime = UnstartedRuntime(Some(runtime));
    let spawn_result = thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            let mut runtime = runtime;
            if let Some(runtime) = runtime.0.take() {
                runtime.block_on(run_loop());
            }
        });

    match spawn_result {
        Ok(join_handle) => {
            debug!(
                event = events::RUNTIME_SPAWN_OK,
                component = COMPONENT,
                worker_thread = thread_name.as_str(),
                "spawned consumer runtime thread"
            );
            Ok(DispatchLoopHandle {
                worker_thread: thread_name,
                join_handle,
            })
        }
        Err(err) => {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                worker_thread = thread_name.as_str(),
                err = %err,
                "unable to spawn consumer runtime thread"
            );
            Err(TransportError::fail_with_code(
                TransportCode::Internal,
                format!("unable to spawn consumer thread {thread_name}: {err}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{spawn_dispatch_loop, spawn_dispatch_loop_on};
    use crate::transport::TransportCode;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn dispatch_loop_runs_on_named_thread_and_joins() {
        let ran_on_named_thread = Arc::new(AtomicBool::new(false));
        let flag = ran_on_named_thread.clone();

        let handle = spawn_dispatch_loop("msg-consumer-t".to_string(), move || async move {
            let named = std::thread::current().name() == Some("msg-consumer-t");
            flag.store(named, Ordering::SeqCst);
        })
        .expect("thread should spawn");

        assert_eq!(handle.worker_thread(), "msg-consumer-t");
        handle.join().await.expect("loop should finish cleanly");
        assert!(ran_on_named_thread.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn join_reports_panicking_loop() {
        let should_panic = true;
        let handle = spawn_dispatch_loop("msg-consumer-p".to_string(), move || async move {
            if should_panic {
                panic!("boom");
            }
        })
        .expect("thread should spawn");

        assert!(handle.join().await.is_err());
    }

    #[test]
    fn runtime_build_failure_fails_the_spawn() {
        let loop_ran = Arc::new(AtomicBool::new(false));
        let flag = loop_ran.clone();

        let result = spawn_dispatch_loop_on(
            "msg-consumer-b".to_string(),
            || Err(io::Error::other("no runtime")),
            move || async move {
                flag.store(true, Ordering::SeqCst);
            },
        );

        let err = result.err().expect("spawn should fail");
        assert_eq!(err.code(), TransportCode::Internal);
        assert!(!loop_ran.load(Ordering::SeqCst));
    }
}
