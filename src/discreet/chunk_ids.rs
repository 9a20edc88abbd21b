//! Chunk identifiers.
//!
//! Only the identifiers the reader knows something about are listed; any
//! other id is skipped by size.

// Shared sub-chunks
pub const VERSION: u16 = 0x0002;
pub const COLOR_F: u16 = 0x0010;
pub const COLOR_24: u16 = 0x0011;
pub const LIN_COLOR_24: u16 = 0x0012;
pub const LIN_COLOR_F: u16 = 0x0013;
pub const INT_PERCENT: u16 = 0x0030;
pub const FLOAT_PERCENT: u16 = 0x0031;

pub const MAIN: u16 = 0x4D4D;
pub const MESH_DATA: u16 = 0x3D3D;
pub const MESH_VERSION: u16 = 0x3D3E;
pub const KEYFRAMES: u16 = 0xB000;

// Scene settings, children of MESH_DATA
pub const MASTER_SCALE: u16 = 0x0100;
pub const BITMAP: u16 = 0x1100;
pub const USE_BITMAP: u16 = 0x1101;
pub const SOLID_BG: u16 = 0x1200;
pub const USE_SOLID_BG: u16 = 0x1201;
pub const V_GRADIENT: u16 = 0x1300;
pub const USE_V_GRADIENT: u16 = 0x1301;
pub const LOW_SHADOW_BIAS: u16 = 0x1400;
pub const HI_SHADOW_BIAS: u16 = 0x1410;
pub const SHADOW_MAP_SIZE: u16 = 0x1420;
pub const SHADOW_SAMPLES: u16 = 0x1430;
pub const SHADOW_RANGE: u16 = 0x1440;
pub const SHADOW_FILTER: u16 = 0x1450;
pub const RAY_BIAS: u16 = 0x1460;
pub const O_CONST: u16 = 0x1500;
pub const AMBIENT_LIGHT: u16 = 0x2100;
pub const FOG: u16 = 0x2200;
pub const USE_FOG: u16 = 0x2201;
pub const FOG_BACKGROUND: u16 = 0x2210;
pub const DISTANCE_CUE: u16 = 0x2300;
pub const USE_DISTANCE_CUE: u16 = 0x2301;
pub const LAYER_FOG: u16 = 0x2302;
pub const USE_LAYER_FOG: u16 = 0x2303;
pub const DCUE_BACKGROUND: u16 = 0x2310;
pub const DEFAULT_VIEW: u16 = 0x3000;
pub const VIEWPORT_LAYOUT_OLD: u16 = 0x7000;
pub const VIEWPORT_LAYOUT: u16 = 0x7001;
pub const NETWORK_VIEW: u16 = 0x7030;

// Named objects
pub const NAMED_OBJECT: u16 = 0x4000;
pub const OBJ_HIDDEN: u16 = 0x4010;
pub const OBJ_VIS_LOFTER: u16 = 0x4011;
pub const OBJ_DOESNT_CAST: u16 = 0x4012;
pub const OBJ_MATTE: u16 = 0x4013;
pub const OBJ_FAST: u16 = 0x4014;
pub const OBJ_PROCEDURAL: u16 = 0x4015;
pub const OBJ_FROZEN: u16 = 0x4016;
pub const OBJ_DONT_RCVSHADOW: u16 = 0x4017;

// Triangle meshes
pub const TRI_MESH: u16 = 0x4100;
pub const VERTEX_LIST: u16 = 0x4110;
pub const VERTEX_FLAGS: u16 = 0x4111;
pub const FACE_LIST: u16 = 0x4120;
pub const MATERIAL_LIST: u16 = 0x4130;
pub const TEXCOORD_LIST: u16 = 0x4140;
pub const SMOOTH_LIST: u16 = 0x4150;
pub const MESH_MATRIX: u16 = 0x4160;
pub const MESH_COLOR: u16 = 0x4165;
pub const MESH_TEXTURE_INFO: u16 = 0x4170;
pub const BOX_MAP: u16 = 0x4190;

// Lights
pub const LIGHT: u16 = 0x4600;
pub const SPOTLIGHT: u16 = 0x4610;
pub const LIGHT_OFF: u16 = 0x4620;
pub const LIGHT_ATTENUATION: u16 = 0x4625;
pub const SPOT_RAYSHADE: u16 = 0x4627;
pub const SPOT_SHADOWED: u16 = 0x4630;
pub const SPOT_LOCAL_SHADOW: u16 = 0x4641;
pub const SPOT_SEE_CONE: u16 = 0x4650;
pub const LIGHT_EXCLUDE: u16 = 0x4654;
pub const SPOT_ROLL: u16 = 0x4656;
pub const SPOT_ASPECT: u16 = 0x4657;
pub const SPOT_RAY_BIAS: u16 = 0x4658;
pub const LIGHT_INNER_RANGE: u16 = 0x4659;
pub const LIGHT_OUTER_RANGE: u16 = 0x465A;
pub const LIGHT_MULTIPLIER: u16 = 0x465B;

// Cameras
pub const CAMERA: u16 = 0x4700;
pub const CAMERA_SEE_CONE: u16 = 0x4710;
pub const CAMERA_RANGES: u16 = 0x4720;

// Materials
pub const MATERIAL: u16 = 0xAFFF;
pub const MAT_NAME: u16 = 0xA000;
pub const MAT_AMBIENT: u16 = 0xA010;
pub const MAT_DIFFUSE: u16 = 0xA020;
pub const MAT_SPECULAR: u16 = 0xA030;
pub const MAT_SHININESS: u16 = 0xA040;
pub const MAT_SHIN2PCT: u16 = 0xA041;
pub const MAT_TRANSPARENCY: u16 = 0xA050;
pub const MAT_XPFALL: u16 = 0xA052;
pub const MAT_REFBLUR: u16 = 0xA053;
pub const MAT_SELF_ILLUM: u16 = 0xA080;
pub const MAT_TWO_SIDE: u16 = 0xA081;
pub const MAT_ADDITIVE: u16 = 0xA083;
pub const MAT_SELF_ILPCT: u16 = 0xA084;
pub const MAT_WIREFRAME: u16 = 0xA085;
pub const MAT_WIRESIZE: u16 = 0xA087;
pub const MAT_XPFALLIN: u16 = 0xA08A;
pub const MAT_PHONGSOFT: u16 = 0xA08C;
pub const MAT_SHADING: u16 = 0xA100;
pub const MAT_USE_REFBLUR: u16 = 0xA250;

// Texture map slots, children of MATERIAL
pub const MAT_TEXMAP: u16 = 0xA200;
pub const MAT_SPECMAP: u16 = 0xA204;
pub const MAT_OPACMAP: u16 = 0xA210;
pub const MAT_REFLMAP: u16 = 0xA220;
pub const MAT_BUMPMAP: u16 = 0xA230;
pub const MAT_TEX2MAP: u16 = 0xA33A;
pub const MAT_SHINMAP: u16 = 0xA33C;
pub const MAT_TEXMASK: u16 = 0xA33E;
pub const MAT_TEX2MASK: u16 = 0xA340;
pub const MAT_OPACMASK: u16 = 0xA342;
pub const MAT_BUMPMASK: u16 = 0xA344;
pub const MAT_SHINMASK: u16 = 0xA346;
pub const MAT_SPECMASK: u16 = 0xA348;
pub const MAT_REFLMASK: u16 = 0xA34C;

// Texture map parameters
pub const MAT_BUMP_PERCENT: u16 = 0xA252;
pub const MAT_MAPNAME: u16 = 0xA300;
pub const MAT_MAP_TILING: u16 = 0xA351;
pub const MAT_MAP_TEXBLUR: u16 = 0xA353;
pub const MAT_MAP_USCALE: u16 = 0xA354;
pub const MAT_MAP_VSCALE: u16 = 0xA356;
pub const MAT_MAP_UOFFSET: u16 = 0xA358;
pub const MAT_MAP_VOFFSET: u16 = 0xA35A;
pub const MAT_MAP_ANG: u16 = 0xA35C;
pub const MAT_MAP_COL1: u16 = 0xA360;
pub const MAT_MAP_COL2: u16 = 0xA362;
pub const MAT_MAP_RCOL: u16 = 0xA364;
pub const MAT_MAP_GCOL: u16 = 0xA366;
pub const MAT_MAP_BCOL: u16 = 0xA368;

// Keyframer
pub const AMBIENT_NODE_TAG: u16 = 0xB001;
pub const OBJECT_NODE_TAG: u16 = 0xB002;
pub const CAMERA_NODE_TAG: u16 = 0xB003;
pub const TARGET_NODE_TAG: u16 = 0xB004;
pub const LIGHT_NODE_TAG: u16 = 0xB005;
pub const L_TARGET_NODE_TAG: u16 = 0xB006;
pub const SPOTLIGHT_NODE_TAG: u16 = 0xB007;
pub const KFSEG: u16 = 0xB008;
pub const KFCURTIME: u16 = 0xB009;
pub const KFHDR: u16 = 0xB00A;
pub const NODE_HDR: u16 = 0xB010;
pub const INSTANCE_NAME: u16 = 0xB011;
pub const PRESCALE: u16 = 0xB012;
pub const PIVOT: u16 = 0xB013;
pub const BOUNDBOX: u16 = 0xB014;
pub const MORPH_SMOOTH: u16 = 0xB015;
pub const POS_TRACK_TAG: u16 = 0xB020;
pub const ROT_TRACK_TAG: u16 = 0xB021;
pub const SCL_TRACK_TAG: u16 = 0xB022;
pub const FOV_TRACK_TAG: u16 = 0xB023;
pub const ROLL_TRACK_TAG: u16 = 0xB024;
pub const COL_TRACK_TAG: u16 = 0xB025;
pub const MORPH_TRACK_TAG: u16 = 0xB026;
pub const HOT_TRACK_TAG: u16 = 0xB027;
pub const FALL_TRACK_TAG: u16 = 0xB028;
pub const HIDE_TRACK_TAG: u16 = 0xB029;
pub const NODE_ID: u16 = 0xB030;

pub const XDATA_SECTION: u16 = 0x8000;
