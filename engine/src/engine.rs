use {
    crate::{clocks::ClockIndex, resources::Resources},
    hecs::World,
};

/// Everything a system may touch during one tick.
pub struct SystemContext<'a> {
    pub world: &'a mut World,
    pub resources: &'a mut Resources,
    pub clocks: ClockIndex,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: SystemContext<'_>);
}

impl<F> System for F
where
    F: FnMut(SystemContext<'_>),
{
    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }

    fn run(&mut self, ctx: SystemContext<'_>) {
        self(ctx)
    }
}

/// Root data structure of the engine.
///
/// Owns the world, shared resources and the schedule.
/// Host calls [`Engine::advance`] once per rendering tick.
pub struct Engine {
    pub world: World,
    pub resources: Resources,
    schedule: Vec<Box<dyn System>>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            world: World::new(),
            resources: Resources::new(),
            schedule: Vec::new(),
        }
    }

    /// Adds a system to this engine.
    /// Systems run in the order they were added.
    pub fn add_system<S>(&mut self, system: S) -> &mut Self
    where
        S: System + 'static,
    {
        tracing::debug!("System '{}' scheduled", system.name());
        self.schedule.push(Box::new(system));
        self
    }

    /// Runs every scheduled system once.
    pub fn advance(&mut self, clocks: ClockIndex) {
        for system in &mut self.schedule {
            let span = tracing::trace_span!(
                "system",
                name = system.name(),
                frame = clocks.frame
            );
            let _enter = span.enter();

            system.run(SystemContext {
                world: &mut self.world,
                resources: &mut self.resources,
                clocks,
            });
        }
    }
}
