// catch_tests.rs - Category matching for CATCH and CATCH_ALL clauses

use std::cell::{Cell, RefCell};

use quickcheck::quickcheck;
use test_case::test_case;
use unwinder::{exception_category, Category, Config, Context};

exception_category! {
    OOPS = "Oops";
    NOT_FOUND = "Not found";
}

fn context() -> Context {
    Context::with_config(Config::default().panicking()).unwrap()
}

#[test]
fn catch_all_sees_name_and_default_message() {
    let mut ctx = context();
    let caught = Cell::new(false);

    ctx.attempt(|ctx| Err(ctx.throw_default(&OOPS)))
        .catch_all(|ctx| {
            caught.set(true);
            assert_eq!(ctx.exception().name(), "OOPS");
            assert_eq!(ctx.exception().message(), "Oops");
            Ok(())
        })
        .end()
        .unwrap();

    assert!(caught.get());
}

#[test]
fn catch_all_sees_explicit_message() {
    let mut ctx = context();
    let message = RefCell::new(String::new());

    ctx.attempt(|ctx| Err(ctx.throw(&OOPS, "I did it again")))
        .catch_all(|ctx| {
            message.borrow_mut().push_str(ctx.exception().message());
            Ok(())
        })
        .end()
        .unwrap();

    assert_eq!(*message.borrow(), "I did it again");
}

#[test]
fn formatted_throw() {
    let mut ctx = context();
    let message = RefCell::new(String::new());

    ctx.attempt(|ctx| Err(ctx.throw_fmt(&OOPS, format_args!("{}_{}", "FORMATTED", "MESSAGE"))))
        .catch(&OOPS, |ctx| {
            assert_eq!(ctx.exception().name(), "OOPS");
            message.borrow_mut().push_str(ctx.exception().message());
            Ok(())
        })
        .end()
        .unwrap();

    assert_eq!(*message.borrow(), "FORMATTED_MESSAGE");
}

#[test]
fn same_text_is_not_same_category() {
    let lookalike = Category::named("OOPS", "Oops");
    let mut ctx = context();
    let log = RefCell::new(Vec::new());

    ctx.attempt(|ctx| Err(ctx.throw_default(&lookalike)))
        .catch(&OOPS, |_| {
            log.borrow_mut().push("static");
            Ok(())
        })
        .catch(&lookalike, |_| {
            log.borrow_mut().push("lookalike");
            Ok(())
        })
        .end()
        .unwrap();

    assert_eq!(*log.borrow(), vec!["lookalike"]);
}

#[test_case(true ; "specific catch")]
#[test_case(false ; "catch all")]
fn unmatched_catch_falls_through(specific: bool) {
    let mut ctx = context();
    let hit = Cell::new(false);

    let scope = ctx.attempt(|ctx| {
        ctx.attempt(|ctx| Err(ctx.throw(&OOPS, "inner")))
            .catch(&NOT_FOUND, |_| panic!("wrong category caught"))
            .end()
    });
    let result = if specific {
        scope
            .catch(&OOPS, |ctx| {
                hit.set(ctx.exception().message() == "inner");
                Ok(())
            })
            .end()
    } else {
        scope
            .catch_all(|ctx| {
                hit.set(ctx.exception().message() == "inner");
                Ok(())
            })
            .end()
    };

    assert!(result.is_ok());
    assert!(hit.get());
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn no_clause_runs_without_an_exception() {
    let mut ctx = context();
    let ran = Cell::new(0);

    ctx.attempt(|_| Ok(()))
        .catch(&OOPS, |_| {
            ran.set(ran.get() + 1);
            Ok(())
        })
        .catch_all(|_| {
            ran.set(ran.get() + 1);
            Ok(())
        })
        .end()
        .unwrap();

    assert_eq!(ran.get(), 0);
}

#[test]
fn later_throw_replaces_record() {
    let mut ctx = context();

    ctx.attempt(|ctx| Err(ctx.throw(&OOPS, "first")))
        .catch_all(|_| Ok(()))
        .end()
        .unwrap();
    assert!(ctx.exception().is(&OOPS));

    ctx.attempt(|ctx| Err(ctx.throw_default(&NOT_FOUND)))
        .catch(&NOT_FOUND, |ctx| {
            assert!(!ctx.exception().is(&OOPS));
            assert_eq!(ctx.exception().message(), "Not found");
            Ok(())
        })
        .end()
        .unwrap();
}

quickcheck! {
    fn distinct_categories_never_match(message: String, use_catch_all: bool) -> bool {
        let thrown = Category::declare("Thrown");
        let other = Category::declare("Other");
        let mut ctx = context();
        let wrong = Cell::new(false);
        let right = Cell::new(false);

        let scope = ctx
            .attempt(|ctx| Err(ctx.throw(&thrown, &message)))
            .catch(&other, |_| {
                wrong.set(true);
                Ok(())
            });
        let result = if use_catch_all {
            scope
                .catch_all(|_| {
                    right.set(true);
                    Ok(())
                })
                .end()
        } else {
            scope
                .catch(&thrown, |_| {
                    right.set(true);
                    Ok(())
                })
                .end()
        };

        result.is_ok() && !wrong.get() && right.get()
    }
}
