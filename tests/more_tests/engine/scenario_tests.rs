// scenario_tests.rs - End-to-end TRY/CATCH/FINALLY flows

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use unwinder::{exception_category, throw, Config, Context, Exception, Outcome, UncaughtAction};

exception_category! {
    NOT_FOUND = "Not found";
    X = "X";
}

fn exit_with_failure(exception: &Exception) -> ! {
    panic!("terminated by {}", exception.name())
}

#[test]
fn caught_exception_is_handled() {
    let mut ctx = Context::new();
    let mut status = "unset";

    ctx.attempt(|ctx| Err(ctx.throw(&NOT_FOUND, "missing")))
        .catch(&NOT_FOUND, |_| {
            status = "handled";
            Ok(())
        })
        .end()
        .unwrap();

    assert_eq!(status, "handled");
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn finally_only_observes_uncaught_then_terminates() {
    let config = Config::default().with_uncaught_action(UncaughtAction::Custom(exit_with_failure));
    let mut ctx = Context::with_config(config).unwrap();
    let observed = Cell::new(None);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.attempt(|ctx| Err(ctx.throw_default(&NOT_FOUND)))
            .finally(|ctx| {
                observed.set(Some(ctx.is_uncaught()));
                Ok(())
            })
            .end()
    }));

    let payload = result.expect_err("uncaught exception must terminate");
    let message = payload.downcast_ref::<String>().cloned().unwrap_or_default();
    assert_eq!(message, "terminated by NOT_FOUND");
    assert_eq!(observed.get(), Some(true));
}

#[test]
fn inner_finally_runs_before_outer_catch() {
    let mut ctx = Context::new();
    let order = RefCell::new(Vec::new());

    ctx.attempt(|ctx| {
        ctx.attempt(|ctx| Err(ctx.throw_default(&X)))
            .finally(|_| {
                order.borrow_mut().push("inner_ran");
                Ok(())
            })
            .end()
    })
    .catch(&X, |_| {
        order.borrow_mut().push("outer_caught");
        Ok(())
    })
    .end()
    .unwrap();

    assert_eq!(*order.borrow(), vec!["inner_ran", "outer_caught"]);
}

fn lookup(ctx: &mut Context, key: u32) -> Outcome<&'static str> {
    match key {
        1 => Ok("one"),
        _ => throw!(ctx, NOT_FOUND, "key {} is missing", key),
    }
}

#[test]
fn rethrow_skips_outer_body_but_runs_its_clauses() {
    let mut ctx = Context::new();
    let outer_body_after_inner = Cell::new(false);
    let log = RefCell::new(Vec::new());

    ctx.attempt(|ctx| {
        ctx.attempt(|ctx| lookup(ctx, 7).map(|_| ()))
            .catch(&NOT_FOUND, |ctx| {
                log.borrow_mut().push(format!("inner: {}", ctx.exception().message()));
                Err(ctx.rethrow())
            })
            .end()?;
        outer_body_after_inner.set(true);
        Ok(())
    })
    .catch(&NOT_FOUND, |ctx| {
        log.borrow_mut().push(format!("outer: {}", ctx.exception().message()));
        Ok(())
    })
    .finally(|_| {
        log.borrow_mut().push("outer finally".to_string());
        Ok(())
    })
    .end()
    .unwrap();

    assert!(!outer_body_after_inner.get());
    assert_eq!(
        *log.borrow(),
        vec![
            "inner: key 7 is missing".to_string(),
            "outer: key 7 is missing".to_string(),
            "outer finally".to_string(),
        ]
    );
}

#[test]
fn throwing_helper_returns_value_when_found() {
    let mut ctx = Context::new();
    let mut found = None;

    ctx.attempt(|ctx| {
        found = Some(lookup(ctx, 1)?);
        Ok(())
    })
    .catch_all(|_| Ok(()))
    .end()
    .unwrap();

    assert_eq!(found, Some("one"));
}

#[test]
fn long_messages_are_truncated_through_the_context() {
    let config = Config::default().with_max_message_length(8);
    let mut ctx = Context::with_config(config).unwrap();
    let seen = RefCell::new(None);

    ctx.attempt(|ctx| Err(ctx.throw(&NOT_FOUND, "a message that does not fit")))
        .catch(&NOT_FOUND, |ctx| {
            let exception = ctx.exception();
            *seen.borrow_mut() = Some((exception.message().to_string(), exception.is_truncated()));
            Ok(())
        })
        .end()
        .unwrap();

    let (message, truncated) = seen.into_inner().unwrap();
    assert!(truncated);
    assert_eq!(message, "a messag");
}
