//! Параметры тестового заезда

/// Начальное состояние
pub mod initial {
    /// Скорость лидера, м/с (108 км/ч)
    pub const LEAD_SPEED_MS: f32 = 30.0;
    /// Наша скорость, м/с (54 км/ч)
    pub const EGO_SPEED_MS: f32 = 15.0;
    /// Дистанция до лидера, м
    pub const DISTANCE_M: f32 = 100.0;
    pub const LEAD_ACC_MS2: f32 = 0.0;
    pub const EGO_ACC_MS2: f32 = 0.0;
}

/// Геометрия и желаемая дистанция
pub mod following {
    /// Идеальная дистанция - путь за это время на нашей скорости, с
    pub const IDEAL_HEADWAY_S: f32 = 1.5;
    /// Длина автомобиля, м
    pub const CAR_LENGTH_M: f32 = 5.0;
    /// Нижняя граница идеальной дистанции (при остановке), м
    pub const MIN_IDEAL_DISTANCE_M: f32 = CAR_LENGTH_M;
}

/// Случайные события
pub mod events {
    /// Вероятность ухода лидера или вклинивания другой машины, %
    pub const CHANCE_OF_DISTANCE_JUMP: u32 = 0;
    /// Вероятность смены ускорения лидером, %
    pub const CHANCE_OF_ACC_CHANGE: u32 = 0;
    /// Ускорение лидера во время эпизода, м/с²
    pub const LEAD_ACC_STEP_MS2: f32 = 1.0;
    /// Максимальная длительность эпизода ускорения, шагов
    pub const MAX_ACC_EPISODE_STEPS: u32 = 20;
}

/// Длительность заезда, с (шаг 1 с)
pub const TRAVEL_TIME_S: u32 = 1000;
