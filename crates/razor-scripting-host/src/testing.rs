//! Fixture for handler tests: a small world, a store, one gate and a
//! captured action channel.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use razor_client::{ClientAction, Item, Layer, Mobile, Point3D, Serial, World};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::commands::{CommandTable, Continuation};
use crate::context::{ExpressionContext, ScriptContext};
use crate::error::ScriptError;
use crate::expressions::ExpressionTable;
use crate::flat_script::parse_line;
use crate::gate::PauseGate;
use crate::store::MemoryStore;
use crate::value::Value;

pub const PLAYER: Serial = Serial(0x100);
pub const BACKPACK: Serial = Serial(0x4000_0001);

pub struct Harness {
    pub world: World,
    pub store: MemoryStore,
    pub gate: PauseGate,
    pub rng: StdRng,
    pub now: Instant,
    tx: UnboundedSender<ClientAction>,
    rx: UnboundedReceiver<ClientAction>,
}

impl Harness {
    /// Player at (1000, 1000) wearing an empty backpack
    pub fn new() -> Self {
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

        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            world,
            store: MemoryStore::new(),
            gate: PauseGate::new(),
            rng: StdRng::seed_from_u64(1),
            now: Instant::now(),
            tx,
            rx,
        }
    }

    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut ScriptContext<'_>) -> R) -> R {
        let mut ctx = ScriptContext::new(
            &self.world,
            &mut self.store,
            &mut self.gate,
            &self.tx,
            &mut self.rng,
            self.now,
            "test",
        );
        f(&mut ctx)
    }

    /// Run one script line, e.g. `"@target! 0x100"`
    pub fn command(
        &mut self,
        table: &CommandTable,
        line: &str,
    ) -> Result<Continuation, ScriptError> {
        let instruction = parse_line(line, 1)
            .expect("line parses")
            .expect("line is not blank");
        self.with_context(|ctx| {
            table.execute(
                ctx,
                &instruction.verb,
                &instruction.args,
                instruction.quiet,
                instruction.force,
            )
        })
    }

    /// Evaluate `"name arg..."`; a leading `@` makes it quiet
    pub fn expression(
        &mut self,
        table: &ExpressionTable,
        line: &str,
    ) -> Result<Value, ScriptError> {
        let instruction = parse_line(line, 1)
            .expect("line parses")
            .expect("line is not blank");
        self.with_context(|ctx| {
            let mut ctx = ExpressionContext::new(ctx);
            table.evaluate(&mut ctx, &instruction.verb, &instruction.args, instruction.quiet)
        })
    }

    /// Everything sent since the last call
    pub fn actions(&mut self) -> Vec<ClientAction> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    pub fn add_item(&mut self, serial: u32, graphic: u16, container: Option<Serial>) -> Serial {
        let mut item = Item::new(Serial(serial), "item", graphic);
        item.container = container;
        if container.is_none() {
            item.position = Point3D::new(1001, 1000, 0);
        }
        self.world.add_item(item);
        Serial(serial)
    }

    pub fn add_mobile(&mut self, serial: u32, body: u16, x: i32) -> Serial {
        let mut mobile = Mobile::new(Serial(serial), "mobile", body);
        mobile.position = Point3D::new(x, 1000, 0);
        self.world.add_mobile(mobile);
        Serial(serial)
    }
}
