//! Тестовый заезд нечеткого круиз-контроля на хосте
//!
//! Использование: `test-drive [seed]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use acc_fuzzy::data::StepRecord;
use acc_fuzzy::simulation::{DriveConfig, TestDrive};
use acc_fuzzy::AccController;

fn main() -> ExitCode {
    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("seed must be an unsigned integer, got {:?}", arg);
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };

    let controller = match AccController::new() {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("controller configuration failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = DriveConfig::default();
    if cfg!(feature = "debug-drive") {
        println!("[test drive begin] seed {}", seed);
    }
    let drive = TestDrive::new(&controller, config, seed);
    let report = match drive.run_with(|record| trace_step(&config, record)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("test drive aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cfg!(feature = "debug-drive") {
        println!("[test drive end]\n");
    }

    // 1. Удержание дистанции
    println!("Distance handling (the accumulated square difference)");
    println!("{:.3}", report.distance_error);
    // 2. Комфорт
    println!("Comfortness (accumulated acceleration square)");
    println!("{:.3}", report.comfort);
    // 3. Безопасность
    println!("Safeness (#collision/seconds)");
    println!("{:.3}", report.collision_rate());

    ExitCode::SUCCESS
}

/// Вывод шага заезда (фича `debug-drive`): состояние в начале шага,
/// затем события шага
fn trace_step(config: &DriveConfig, record: &StepRecord) {
    if !cfg!(feature = "debug-drive") {
        return;
    }

    let before = &record.before;
    println!("[{}]", record.step);
    println!("relative speed: {:.3}", before.relative_speed());
    println!(
        "distance ratio: {:.3}",
        before.distance_ratio(config.ideal_headway_s, config.min_ideal_distance_m)
    );
    println!("acc_me: {:.3}", before.ego.acc_ms2);
    println!("acc_front: {:.3}", before.lead.acc_ms2);
    println!("speed_me: {:.3}", before.ego.speed_ms);
    println!("speed_front: {:.3}", before.lead.speed_ms);
    for event in record.events.iter() {
        println!("event: {:?}", event);
    }
    if record.collision {
        println!("\touch!!");
    }
}
