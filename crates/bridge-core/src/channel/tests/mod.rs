mod method_channel_tests;
