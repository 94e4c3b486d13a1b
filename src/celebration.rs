use rand::seq::SliceRandom;
use std::time::SystemTime;

const SYMBOLS: [char; 7] = ['*', '+', 'o', '.', '\'', '~', '"'];

/// Single confetti glyph launched when a word is completed.
#[derive(Debug, Clone)]
pub struct Confetti {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Confetti {
    fn new(x: f64, y: f64) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SYMBOLS.choose(&mut rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
        }
    }

    /// Advance one timestep; returns false once the piece has expired.
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += 15.0 * dt; // gravity
        self.age += dt;
        self.age < self.max_age
    }
}

/// Confetti burst shown over the results screen after a won game,
/// advanced by the runtime tick.
#[derive(Debug)]
pub struct WinCelebration {
    pub particles: Vec<Confetti>,
    pub start_time: SystemTime,
    pub duration: f64,
    pub is_active: bool,
    terminal_width: f64,
    terminal_height: f64,
}

impl WinCelebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            start_time: SystemTime::now(),
            duration: 3.0,
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    /// Launch a burst over the results screen. Bigger wins throw more
    /// confetti, capped so small terminals stay readable.
    pub fn start(&mut self, score: u32, width: u16, height: u16) {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.start_time = SystemTime::now();
        self.is_active = true;
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        let center_x = width as f64 / 2.0;
        let center_y = height as f64 / 2.0;

        let count = (20 + 2 * score).min(80);
        for _ in 0..count {
            let offset_x = rng.gen_range(-15.0..15.0);
            let offset_y = rng.gen_range(-6.0..6.0);
            self.particles
                .push(Confetti::new(center_x + offset_x, center_y + offset_y));
        }
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.is_active = false;
            self.particles.clear();
            return;
        }

        let dt = 0.1; // fixed timestep, one tick
        let width = self.terminal_width;
        let height = self.terminal_height;
        self.particles.retain_mut(|piece| {
            let alive = piece.update(dt);
            let buffer = 5.0;
            let off_screen =
                piece.y > height + buffer || piece.x < -buffer || piece.x > width + buffer;
            alive && !off_screen
        });
    }
}

impl Default for WinCelebration {
    fn default() -> Self {
        Self::new()
    }
}
