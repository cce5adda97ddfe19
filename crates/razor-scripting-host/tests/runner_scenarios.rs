use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use razor_client::{ClientAction, Item, Layer, Mobile, Point3D, Serial, SharedWorld, World};
use razor_scripting_host::{
    Argument, FlatScript, Interpreter, ScriptEngine, ScriptError, ScriptExit, ScriptRunner,
    ScriptStore, StepOutcome, Value, FOUND_ALIAS,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

const PLAYER: Serial = Serial(0x100);
const BACKPACK: Serial = Serial(0x4000_0001);
const BANDAGE: Serial = Serial(0x4000_0002);
const TICK: Duration = Duration::from_millis(25);

fn world() -> World {
    let mut world = World::new();
    let mut player = Mobile::new(PLAYER, "Tester", 0x190);
    player.position = Point3D::new(1000, 1000, 0);
    player.hits = 80;
    player.hits_max = 100;
    world.set_player(player);

    let mut pack = Item::new(BACKPACK, "Backpack", 0x0E75);
    pack.container = Some(PLAYER);
    pack.layer = Some(Layer::Backpack);
    pack.is_container = true;
    world.add_item(pack);
    world
}

fn runner(world: World) -> (ScriptRunner, UnboundedReceiver<ClientAction>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let runner = ScriptRunner::new(SharedWorld::new(world), tx).with_rng_seed(7);
    (runner, rx)
}

fn drain(rx: &mut UnboundedReceiver<ClientAction>) -> Vec<ClientAction> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

fn flat(name: &str, source: &str) -> Box<FlatScript> {
    Box::new(FlatScript::parse(name, source).unwrap())
}

/// Evaluates one expression and records the result
struct Probe {
    expression: &'static str,
    args: Vec<Argument>,
    result: Arc<Mutex<Option<Result<Value, ScriptError>>>>,
}

impl ScriptEngine for Probe {
    fn name(&self) -> &str {
        "probe"
    }

    fn step(&mut self, interp: &mut Interpreter<'_, '_>) -> Result<StepOutcome, ScriptError> {
        let value = interp.evaluate(self.expression, &self.args, false);
        *self.result.lock().unwrap() = Some(value);
        Ok(StepOutcome::Finished)
    }
}

fn probe(
    runner: &mut ScriptRunner,
    expression: &'static str,
    args: &[&str],
) -> Result<Value, ScriptError> {
    let result = Arc::new(Mutex::new(None));
    runner.start_script(Box::new(Probe {
        expression,
        args: args.iter().map(|a| Argument::new(*a)).collect(),
        result: result.clone(),
    }));
    runner.fire(Instant::now());
    let value = result.lock().unwrap().take();
    value.expect("probe ran")
}

#[test]
fn test_findtype_in_world_finds_bandage_in_backpack() {
    let mut world = world();
    let mut bandage = Item::new(BANDAGE, "bandage", 3617);
    bandage.container = Some(BACKPACK);
    world.add_item(bandage);
    let (mut runner, mut rx) = runner(world);

    assert_eq!(
        probe(&mut runner, "findtype", &["3617", "any", "world"]),
        Ok(Value::Bool(true))
    );
    assert_eq!(runner.store().get_alias(FOUND_ALIAS), Some(BANDAGE));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_pause_zero_yields_once() {
    let (mut runner, mut rx) = runner(world());
    let id = runner.start_script(flat("wait", "pause 0"));
    let t0 = Instant::now();

    runner.fire(t0);
    assert!(runner.is_running(id));
    runner.fire(t0 + TICK);
    assert!(!runner.is_running(id));
    assert_eq!(
        runner.take_finished(),
        vec![(id, "wait".to_string(), ScriptExit::Completed)]
    );
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_hits_reads_player_quietly() {
    let (mut runner, mut rx) = runner(world());
    assert_eq!(probe(&mut runner, "hits", &[]), Ok(Value::Int(80)));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_rename_usage_aborts_without_packet() {
    let (mut runner, mut rx) = runner(world());
    let id = runner.start_script(flat("namer", "rename 0x200\nsysmsg 'unreachable'"));
    runner.fire(Instant::now());

    assert_eq!(
        drain(&mut rx),
        vec![ClientAction::system_message("Usage: rename (serial) ('name')")]
    );
    assert_eq!(
        runner.take_finished(),
        vec![(
            id,
            "namer".to_string(),
            ScriptExit::Aborted(ScriptError::Usage("rename (serial) ('name')"))
        )]
    );
}

#[test]
fn test_setability_off_clears_both_sides() {
    let (mut runner, mut rx) = runner(world());
    runner.start_script(flat("stun", "setability stun off"));
    runner.fire(Instant::now());
    assert_eq!(
        drain(&mut rx),
        vec![ClientAction::ClearAbility, ClientAction::ClientClearAbility]
    );
}

#[test]
fn test_pause_blocks_for_its_duration() {
    let (mut runner, mut rx) = runner(world());
    runner.start_script(flat("slow", "sysmsg 'one'\npause 100\nsysmsg 'two'"));
    let t0 = Instant::now();

    runner.fire(t0);
    assert_eq!(drain(&mut rx), vec![ClientAction::system_message("one")]);
    let mut pending = 0;
    for n in 1..=3 {
        runner.fire(t0 + TICK * n);
        if drain(&mut rx).is_empty() {
            pending += 1;
        }
    }
    assert_eq!(pending, 3);
    runner.fire(t0 + TICK * 4);
    assert_eq!(drain(&mut rx), vec![ClientAction::system_message("two")]);
    assert!(runner.is_idle());
}

#[test]
fn test_each_script_has_its_own_gate() {
    let (mut runner, mut rx) = runner(world());
    let slow = runner.start_script(flat("slow", "pause 1000\nsysmsg 'slow'"));
    let fast = runner.start_script(flat("fast", "pause 25\nsysmsg 'fast'"));
    let t0 = Instant::now();

    runner.fire(t0);
    runner.fire(t0 + TICK);
    assert_eq!(drain(&mut rx), vec![ClientAction::system_message("fast")]);
    assert!(runner.is_running(slow));
    assert!(!runner.is_running(fast));
}

#[test]
fn test_soft_errors_do_not_stop_the_script() {
    let (mut runner, mut rx) = runner(world());
    runner.start_script(flat(
        "loot",
        "useobject 0x40000099\n@useobject 0x40000099\nsysmsg 'after'",
    ));
    runner.fire(Instant::now());

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1], ClientAction::system_message("after"));
    assert_eq!(runner.take_finished()[0].2, ScriptExit::Completed);
}

#[test]
fn test_unknown_verb_aborts_with_script_name() {
    let (mut runner, mut rx) = runner(world());
    runner.start_script(flat("typo", "dance"));
    runner.fire(Instant::now());
    assert_eq!(
        drain(&mut rx),
        vec![ClientAction::system_message(
            "Script typo error => Unknown command 'dance'"
        )]
    );
}

#[test]
fn test_step_budget_spreads_long_scripts_over_firings() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runner = ScriptRunner::new(SharedWorld::new(world()), tx).with_max_steps(2);
    runner.start_script(flat("chatty", "sysmsg 'a'\nsysmsg 'b'\nsysmsg 'c'"));

    runner.fire(Instant::now());
    assert_eq!(drain(&mut rx).len(), 2);
    runner.fire(Instant::now());
    assert_eq!(drain(&mut rx).len(), 1);
    assert!(runner.is_idle());
}

#[test]
fn test_stop_script_records_exit() {
    let (mut runner, _rx) = runner(world());
    let id = runner.start_script(flat("wait", "pause 5000"));
    runner.fire(Instant::now());
    assert!(runner.stop_script(id));
    assert!(!runner.stop_script(id));
    assert_eq!(runner.take_finished()[0].2, ScriptExit::Stopped);
}

#[test]
fn test_host_registration_overrides_builtin() {
    let (mut runner, mut rx) = runner(world());
    runner
        .commands_mut()
        .register("ping", |ctx, _args, _quiet, _force| {
            ctx.send_action(ClientAction::system_message("pong"));
            Ok(razor_scripting_host::Continuation::Advance)
        });
    runner.start_script(flat("net", "ping"));
    runner.fire(Instant::now());
    assert_eq!(drain(&mut rx), vec![ClientAction::system_message("pong")]);
}
