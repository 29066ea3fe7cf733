//! 灵巧手预设
//!
//! 一次灵巧手指令可以用命名预设描述，也可以逐指给出控制参数，两者可以同时提供：
//! 先展开预设，再用显式给出的单指参数覆盖对应手指。没有预设也没有显式值的手指
//! 保持未设置，由设备绑定填充默认值。

use crate::coerce::to_finger_control;
use crate::error::CoercionError;
use crate::input::Input;
use booster_types::FingerControl;
use std::fmt;
use std::str::FromStr;

/// 手指槽位（按接口顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerSlot {
    ThumbRotation,
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerSlot {
    pub const ALL: [FingerSlot; 6] = [
        FingerSlot::ThumbRotation,
        FingerSlot::Thumb,
        FingerSlot::Index,
        FingerSlot::Middle,
        FingerSlot::Ring,
        FingerSlot::Pinky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FingerSlot::ThumbRotation => "thumb_rotation",
            FingerSlot::Thumb => "thumb",
            FingerSlot::Index => "index",
            FingerSlot::Middle => "middle",
            FingerSlot::Ring => "ring",
            FingerSlot::Pinky => "pinky",
        }
    }
}

/// 六指控制集合，每个槽位可选
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FingerSet {
    slots: [Option<FingerControl>; 6],
}

impl FingerSet {
    /// 所有槽位设为同一个值
    pub fn uniform(control: FingerControl) -> Self {
        FingerSet {
            slots: [Some(control); 6],
        }
    }

    pub fn get(&self, slot: FingerSlot) -> Option<FingerControl> {
        self.slots[slot as usize]
    }

    pub fn set(&mut self, slot: FingerSlot, control: FingerControl) {
        self.slots[slot as usize] = Some(control);
    }

    /// 按接口顺序遍历已设置的槽位
    pub fn iter(&self) -> impl Iterator<Item = (FingerSlot, FingerControl)> + '_ {
        FingerSlot::ALL
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|c| (slot, c)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// 命名预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandPreset {
    /// 五指全开
    OpenAll,
    /// 五指全闭
    CloseAll,
    /// 拇指 + 食指捏取，其余手指张开
    Pinch,
}

impl HandPreset {
    /// 可识别的预设名称
    pub const NAMES: &'static str = "open_all, close_all, pinch";

    pub fn name(&self) -> &'static str {
        match self {
            HandPreset::OpenAll => "open_all",
            HandPreset::CloseAll => "close_all",
            HandPreset::Pinch => "pinch",
        }
    }

    /// 预设展开后的单指参数
    pub fn fingers(&self) -> FingerSet {
        const OPEN: FingerControl = FingerControl::new(0.0, 100, 500);
        const CLOSED: FingerControl = FingerControl::new(1.5, 500, 500);
        const GRIP: FingerControl = FingerControl::new(1.2, 400, 500);

        match self {
            HandPreset::OpenAll => FingerSet::uniform(OPEN),
            HandPreset::CloseAll => FingerSet::uniform(CLOSED),
            HandPreset::Pinch => FingerSet {
                slots: [
                    Some(GRIP),
                    Some(GRIP),
                    Some(GRIP),
                    Some(OPEN),
                    Some(OPEN),
                    Some(OPEN),
                ],
            },
        }
    }
}

impl FromStr for HandPreset {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_all" => Ok(HandPreset::OpenAll),
            "close_all" => Ok(HandPreset::CloseAll),
            "pinch" => Ok(HandPreset::Pinch),
            other => Err(CoercionError::InvalidPreset {
                name: other.to_string(),
                accepted: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for HandPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 灵巧手指令选项
///
/// 所有字段默认为 `None`。单指参数可以是任意 [`FingerControl`] 形状。
///
/// # 示例
///
/// ```rust
/// use booster_client::{DexterousHandOptions, FingerSlot};
///
/// let fingers = DexterousHandOptions::new()
///     .preset("pinch")
///     .index((0.8, 300, 500))
///     .resolve()
///     .unwrap();
///
/// // 显式给出的食指参数覆盖预设
/// assert_eq!(fingers.get(FingerSlot::Index).unwrap().angle, 0.8);
/// assert_eq!(fingers.get(FingerSlot::Thumb).unwrap().angle, 1.2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DexterousHandOptions {
    pub preset: Option<String>,
    pub thumb_rotation: Option<Input>,
    pub thumb: Option<Input>,
    pub index: Option<Input>,
    pub middle: Option<Input>,
    pub ring: Option<Input>,
    pub pinky: Option<Input>,
}

impl DexterousHandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置预设名称（在 [`resolve`](Self::resolve) 时校验）
    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    /// 设置指定槽位的单指参数
    pub fn finger(mut self, slot: FingerSlot, control: impl Into<Input>) -> Self {
        *self.slot_mut(slot) = Some(control.into());
        self
    }

    pub fn thumb_rotation(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::ThumbRotation, control)
    }

    pub fn thumb(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::Thumb, control)
    }

    pub fn index(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::Index, control)
    }

    pub fn middle(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::Middle, control)
    }

    pub fn ring(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::Ring, control)
    }

    pub fn pinky(self, control: impl Into<Input>) -> Self {
        self.finger(FingerSlot::Pinky, control)
    }

    fn slot_mut(&mut self, slot: FingerSlot) -> &mut Option<Input> {
        match slot {
            FingerSlot::ThumbRotation => &mut self.thumb_rotation,
            FingerSlot::Thumb => &mut self.thumb,
            FingerSlot::Index => &mut self.index,
            FingerSlot::Middle => &mut self.middle,
            FingerSlot::Ring => &mut self.ring,
            FingerSlot::Pinky => &mut self.pinky,
        }
    }

    /// 展开预设并合并显式单指参数
    ///
    /// # 错误
    ///
    /// - 预设名称未知：`InvalidPreset`
    /// - 单指参数形状错误：对应的强制转换错误
    pub fn resolve(mut self) -> Result<FingerSet, CoercionError> {
        let mut fingers = match self.preset.as_deref() {
            Some(name) => name.parse::<HandPreset>()?.fingers(),
            None => FingerSet::default(),
        };

        for slot in FingerSlot::ALL {
            if let Some(input) = self.slot_mut(slot).take() {
                fingers.set(slot, to_finger_control(input)?);
            }
        }

        Ok(fingers)
    }
}
