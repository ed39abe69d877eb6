use std::time::{Duration, Instant};

pub const FLIGHT_DURATION: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlyTo
{
    pub lat: f64,
    pub lng: f64,
    pub zoom: f32,
    pub duration: Duration,
}

pub trait MapView
{
    fn fly_to(&mut self, target: FlyTo, now: Instant);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Camera
{
    lat: f64,
    lng: f64,
    zoom: f32,
}

pub struct TerminalMap
{
    from: Camera,
    to: Camera,
    started: Instant,
    duration: Duration,
}

impl TerminalMap
{
    pub fn new(now: Instant) -> Self
    {
        let origin = Camera {
            lat: 0.0,
            lng: 0.0,
            zoom: 1.0,
        };
        Self {
            from: origin,
            to: origin,
            started: now,
            duration: Duration::ZERO,
        }
    }

    fn camera(&self, now: Instant) -> Camera
    {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(self.started).as_secs_f64()
                / self.duration.as_secs_f64())
            .clamp(0.0, 1.0)
        };
        let eased = t * t * (3.0 - 2.0 * t);
        Camera {
            lat: lerp(self.from.lat, self.to.lat, eased),
            lng: lerp(self.from.lng, self.to.lng, eased),
            zoom: lerp(self.from.zoom as f64, self.to.zoom as f64, eased) as f32,
        }
    }

    pub fn render(&self, width: usize, height: usize, now: Instant) -> Vec<String>
    {
        let width = width.max(8);
        let height = height.max(4);
        let camera = self.camera(now);
        let (marker_col, marker_row) = project(camera.lat, camera.lng, width, height);

        let mut lines = Vec::with_capacity(height + 1);
        for row in 0..height {
            let mut line = String::with_capacity(width + 16);
            for col in 0..width {
                if row == marker_row && col == marker_col {
                    line.push_str("\x1b[38;2;255;64;64m@\x1b[0m");
                } else if row == height / 2 {
                    line.push('-');
                } else if col % (width / 8).max(1) == 0 {
                    line.push(':');
                } else {
                    line.push(' ');
                }
            }
            lines.push(line);
        }
        lines.push(format!(
            "lat {:>7.2}  lng {:>8.2}  zoom {:>4.1}",
            camera.lat, camera.lng, camera.zoom
        ));
        lines
    }
}

impl MapView for TerminalMap
{
    fn fly_to(&mut self, target: FlyTo, now: Instant)
    {
        self.from = self.camera(now);
        self.to = Camera {
            lat: target.lat,
            lng: target.lng,
            zoom: target.zoom,
        };
        self.started = now;
        self.duration = target.duration;
    }
}

fn project(lat: f64, lng: f64, width: usize, height: usize) -> (usize, usize)
{
    let x = ((lng + 180.0) / 360.0).clamp(0.0, 1.0);
    let y = ((90.0 - lat) / 180.0).clamp(0.0, 1.0);
    let col = (x * (width - 1) as f64).round() as usize;
    let row = (y * (height - 1) as f64).round() as usize;
    (col, row)
}

fn lerp(a: f64, b: f64, t: f64) -> f64
{
    a + (b - a) * t
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn projection_corners()
    {
        assert_eq!(project(90.0, -180.0, 37, 19), (0, 0));
        assert_eq!(project(-90.0, 180.0, 37, 19), (36, 18));
        assert_eq!(project(0.0, 0.0, 37, 19), (18, 9));
    }

    #[test]
    fn flight_reaches_target_after_duration()
    {
        let start = Instant::now();
        let mut map = TerminalMap::new(start);
        map.fly_to(
            FlyTo {
                lat: 40.0,
                lng: 100.0,
                zoom: 5.0,
                duration: FLIGHT_DURATION,
            },
            start,
        );

        let midway = map.camera(start + FLIGHT_DURATION / 2);
        assert!(midway.lat > 0.0 && midway.lat < 40.0);

        let done = map.camera(start + FLIGHT_DURATION * 2);
        assert_eq!(done.lat, 40.0);
        assert_eq!(done.lng, 100.0);
        assert_eq!(done.zoom, 5.0);
    }

    #[test]
    fn render_has_marker_and_readout()
    {
        let now = Instant::now();
        let map = TerminalMap::new(now);
        let lines = map.render(40, 12, now);
        assert_eq!(lines.len(), 13);
        assert_eq!(lines.iter().filter(|line| line.contains('@')).count(), 1);
        assert!(lines[12].contains("zoom"));
    }
}
