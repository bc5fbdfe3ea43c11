//! Black-box end-to-end scenarios against the public crate API, the way
//! `fuel-vm`'s `tests/*.rs` drive the interpreter through its public surface
//! rather than reaching into internals.

use concolic_vm::{
    BinOpKind, ConcolicInterpreter, ConcreteInterpreter, Context, ExecutionError, Expr, IdProvider, Instr, Interpret,
    Program, RuntimeValue, SymExpr, Value, Word,
};

use std::rc::Rc;

fn run(instructions: impl IntoIterator<Item = Instr>) -> Context {
    let program = Rc::new(Program::new(instructions));
    let ctx = Context::fresh(program);
    ConcreteInterpreter::with_defaults().run(ctx).expect("program should run to completion")
}

#[test]
fn e1_wrap_around_addition() {
    let ctx = run([Instr::assign(
        "foo",
        Expr::add(Expr::literal(Word::new(u32::MAX)), Expr::literal(Word::ONE)),
    )]);
    assert_eq!(ctx.resolve("foo").unwrap(), RuntimeValue::Concrete(Value::untainted(Word::ZERO)));
}

#[test]
fn e2_input_taints_everything_downstream() {
    let ctx = run([
        Instr::assign("foo", Expr::get_input([1, 2, 3, 4], "foo")),
        Instr::assign("blah", Expr::add(Expr::var("foo"), Expr::literal(Word::ONE))),
    ]);
    assert_eq!(ctx.resolve("foo").unwrap(), RuntimeValue::Concrete(Value::tainted(Word::ONE)));
    assert_eq!(ctx.resolve("blah").unwrap(), RuntimeValue::Concrete(Value::tainted(Word::new(2))));
}

#[test]
fn e3_store_then_load_round_trips_the_sum() {
    let ctx = run([
        Instr::store(
            Expr::literal(Word::new(0x1000)),
            Expr::add(Expr::literal(Word::new(10)), Expr::literal(Word::new(20))),
        )
        .unwrap(),
        Instr::assign("foo", Expr::load(Expr::literal(Word::new(0x1000))).unwrap()),
    ]);
    assert_eq!(ctx.resolve("foo").unwrap(), RuntimeValue::Concrete(Value::untainted(Word::new(30))));
}

#[test]
fn e4_goto_past_the_last_instruction_halts() {
    let ctx = run([
        Instr::assign("foo", Expr::literal(Word::new(20))),
        Instr::goto(Expr::literal(Word::new(3))),
        Instr::assign("foo", Expr::literal(Word::new(30))),
        Instr::assign("blah", Expr::literal(Word::new(10))),
    ]);
    assert_eq!(ctx.resolve("foo").unwrap(), RuntimeValue::Concrete(Value::untainted(Word::new(20))));
    assert!(ctx.current_instr().is_none());
    assert_eq!(ctx.resolve("blah").unwrap(), RuntimeValue::Concrete(Value::untainted(Word::new(10))));
}

#[test]
fn e5_jumping_through_a_tainted_pointer_is_an_attack() {
    let program = Rc::new(Program::new([
        Instr::assign("foo", Expr::get_input([0], "foo")),
        Instr::store(Expr::literal(Word::new(0x1000)), Expr::var("foo")).unwrap(),
        Instr::assign("blah", Expr::load(Expr::literal(Word::new(0x1000))).unwrap()),
        Instr::goto(Expr::var("blah")),
    ]));
    let ctx = Context::fresh(program);
    let err = ConcreteInterpreter::with_defaults().run(ctx).unwrap_err();
    assert!(matches!(err, ExecutionError::Attack { .. }));
}

#[test]
fn e6_concolic_path_condition_matches_the_taken_path() {
    let program = Rc::new(Program::new([
        Instr::assign("X", Expr::mul(Expr::literal(Word::new(2)), Expr::get_input([], "in1"))),
        Instr::if_goto(
            Expr::eq(
                Expr::sub(Expr::var("X"), Expr::add(Expr::literal(Word::new(3)), Expr::literal(Word::new(2)))),
                Expr::literal(Word::new(15)),
            ),
            Expr::literal(Word::new(2)),
            Expr::literal(Word::new(3)),
        ),
        Instr::assign("Y", Expr::add(Expr::literal(Word::new(3)), Expr::var("X"))),
        Instr::if_goto(
            Expr::gt(Expr::var("Y"), Expr::sub(Expr::get_input([], "in2"), Expr::literal(Word::new(20)))),
            Expr::literal(Word::new(4)),
            Expr::literal(Word::new(5)),
        ),
    ]));
    let ctx = Context::fresh(program);
    let mut interp = ConcolicInterpreter::new(
        concolic_vm::DefaultTaintPolicy,
        concolic_vm::DefaultTaintCheckHandler,
        IdProvider::new(),
        false,
    );
    interp.run(ctx).unwrap();

    let s1 = SymExpr::Input("s_1".into());
    let s2 = SymExpr::Input("s_2".into());
    let x = SymExpr::BinOp(BinOpKind::Mul, Box::new(SymExpr::Const(Word::new(2))), Box::new(s1));
    let first = SymExpr::BinOp(
        BinOpKind::Eq,
        Box::new(SymExpr::BinOp(
            BinOpKind::Sub,
            Box::new(x.clone()),
            Box::new(SymExpr::Const(Word::new(5))),
        )),
        Box::new(SymExpr::Const(Word::new(15))),
    );
    let y = SymExpr::BinOp(BinOpKind::Add, Box::new(SymExpr::Const(Word::new(3))), Box::new(x));
    let second = SymExpr::BinOp(
        BinOpKind::Gt,
        Box::new(y),
        Box::new(SymExpr::BinOp(BinOpKind::Sub, Box::new(s2), Box::new(SymExpr::Const(Word::new(20))))),
    );
    assert_eq!(*interp.constraints(), first.and(second));
}

#[test]
fn a_tainted_store_address_marks_the_cell_as_an_attacker_controlled_pointer() {
    let program = Rc::new(Program::new([
        Instr::assign("ptr", Expr::get_input([0x1000], "ptr")),
        Instr::store(Expr::var("ptr"), Expr::literal(Word::new(7))).unwrap(),
    ]));
    let mut ctx = Context::fresh(program);
    ctx = ConcreteInterpreter::with_defaults().run(ctx).unwrap();
    assert!(ctx.memory_mut().get_taint(Word::new(0x1000)).unwrap());
}

#[test]
fn print_statements_does_not_change_program_semantics() {
    let program = || Rc::new(Program::new([Instr::assign("foo", Expr::literal(Word::new(42)))]));
    let quiet = ConcreteInterpreter::with_defaults().run(Context::fresh(program())).unwrap();
    let loud = ConcreteInterpreter::new(concolic_vm::DefaultTaintPolicy, concolic_vm::DefaultTaintCheckHandler, true)
        .run(Context::fresh(program()))
        .unwrap();
    assert_eq!(quiet.resolve("foo").unwrap(), loud.resolve("foo").unwrap());
}
